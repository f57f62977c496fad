use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use storyboard_domain::{ColumnId, Owner, Platform, Priority, SortBy};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "storyboard")]
#[command(about = "A kanban board for short-form video story sequences", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the board file (or set STORYBOARD_FILE env var)
    #[arg(long, short, global = true, value_name = "FILE", env = "STORYBOARD_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// Column operations
    Column(ColumnCommand),
    /// Card operations
    Card(CardCommand),
    /// Design link operations
    Link(LinkCommand),
    /// Remote table operations
    Sync(SyncCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Show every column with its cards and counts
    Show {
        /// Order inside columns: position or priority
        #[arg(long)]
        sort: Option<String>,
    },
}

// Column commands
#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// List the fixed workflow columns
    List,
}

// Card commands
#[derive(Args)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand)]
pub enum CardAction {
    /// Add a new card
    Add(CardAddArgs),
    /// Get a specific card
    Get {
        #[arg(long)]
        id: Uuid,
    },
    /// List cards with optional filters
    List(CardListArgs),
    /// Update a card
    Update(CardUpdateArgs),
    /// Move a card to another column
    Move {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        status: ColumnId,
    },
    /// Place a card just before another one, or at the front
    Reorder {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        before: Option<Uuid>,
    },
    /// Delete a card
    Delete {
        #[arg(long)]
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct CardAddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub status: Option<ColumnId>,
    #[arg(long)]
    pub priority: Option<Priority>,
    #[arg(long)]
    pub owner: Option<Owner>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    /// Design link, share URL or pasted embed snippet
    #[arg(long)]
    pub link: Option<String>,
    /// Free-text due label or YYYY-MM-DD
    #[arg(long)]
    pub due: Option<String>,
    #[arg(long)]
    pub approved_by: Option<String>,
    #[arg(long)]
    pub platform: Option<Platform>,
    #[arg(long)]
    pub slides: Option<String>,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Args)]
pub struct CardListArgs {
    #[arg(long)]
    pub status: Option<ColumnId>,
    #[arg(long)]
    pub priority: Option<Priority>,
    #[arg(long)]
    pub owner: Option<Owner>,
    #[arg(long)]
    pub tag: Option<String>,
    /// Sort by: priority, status, created, updated, title or due
    #[arg(long)]
    pub sort: Option<SortBy>,
    /// Reverse the sort order
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

#[derive(Args)]
pub struct CardUpdateArgs {
    #[arg(long)]
    pub id: Uuid,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub status: Option<ColumnId>,
    #[arg(long)]
    pub priority: Option<Priority>,
    #[arg(long)]
    pub owner: Option<Owner>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub clear_notes: bool,
    #[arg(long)]
    pub link: Option<String>,
    #[arg(long)]
    pub clear_link: bool,
    #[arg(long)]
    pub due: Option<String>,
    #[arg(long)]
    pub clear_due: bool,
    #[arg(long)]
    pub approved_by: Option<String>,
    #[arg(long)]
    pub clear_approved_by: bool,
    #[arg(long)]
    pub platform: Option<Platform>,
    #[arg(long)]
    pub clear_platform: bool,
    #[arg(long)]
    pub slides: Option<String>,
    #[arg(long)]
    pub clear_slides: bool,
    /// Replace all tags
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long, conflicts_with = "tags")]
    pub clear_tags: bool,
}

// Link commands
#[derive(Args)]
pub struct LinkCommand {
    #[command(subcommand)]
    pub action: LinkAction,
}

#[derive(Subcommand)]
pub enum LinkAction {
    /// Turn a pasted link or embed snippet into an embeddable URL
    Normalize { input: String },
    /// Render the preview frame for a link or a card's design link
    Preview {
        #[arg(long, conflicts_with = "input")]
        id: Option<Uuid>,
        #[arg(required_unless_present = "id")]
        input: Option<String>,
        #[arg(long)]
        title: Option<String>,
        /// Also look up the design's title and thumbnail
        #[arg(long)]
        metadata: bool,
    },
}

// Sync commands
#[derive(Args)]
pub struct SyncCommand {
    #[command(subcommand)]
    pub action: SyncAction,
}

#[derive(Subcommand)]
pub enum SyncAction {
    /// Merge the remote table into the local board
    Pull,
    /// Upload the whole local board to the remote table
    Push,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_typed_card_args() {
        let cli = Cli::try_parse_from([
            "storyboard",
            "card",
            "add",
            "--title",
            "Teaser",
            "--status",
            "Needs Editing",
            "--priority",
            "high",
            "--platform",
            "tt",
            "--tag",
            "launch",
            "--tag",
            "q3",
        ])
        .unwrap();

        match cli.command {
            Commands::Card(CardCommand {
                action: CardAction::Add(args),
            }) => {
                assert_eq!(args.status, Some(ColumnId::NeedsEditing));
                assert_eq!(args.priority, Some(Priority::High));
                assert_eq!(args.platform, Some(Platform::TikTok));
                assert_eq!(args.tags, vec!["launch", "q3"]);
            }
            _ => panic!("expected card add"),
        }
    }

    #[test]
    fn test_preview_requires_id_or_input() {
        assert!(Cli::try_parse_from(["storyboard", "link", "preview"]).is_err());
        assert!(Cli::try_parse_from(["storyboard", "link", "preview", "https://x.y"]).is_ok());
    }

    #[test]
    fn test_list_sort_args() {
        let cli = Cli::try_parse_from(["storyboard", "card", "list", "--sort", "due", "--desc"])
            .unwrap();
        match cli.command {
            Commands::Card(CardCommand {
                action: CardAction::List(args),
            }) => {
                assert_eq!(args.sort, Some(SortBy::Due));
                assert!(args.desc);
            }
            _ => panic!("expected card list"),
        }

        assert!(Cli::try_parse_from(["storyboard", "card", "list", "--desc"]).is_err());
        assert!(Cli::try_parse_from(["storyboard", "card", "list", "--sort", "points"]).is_err());
    }

    #[test]
    fn test_file_flag_is_global() {
        let cli = Cli::try_parse_from(["storyboard", "board", "show", "--file", "/tmp/b.json"])
            .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/b.json")));
    }
}
