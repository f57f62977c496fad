use crate::cli::{BoardAction, ColumnAction};
use crate::context::CliContext;
use crate::output;
use storyboard_core::ColumnSort;
use storyboard_domain::COLUMNS;

pub async fn handle(ctx: &CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::Show { sort } => {
            let sort = match sort {
                Some(s) => parse_sort(&s).map_err(anyhow::Error::msg)?,
                None => ctx.config.column_sort,
            };
            output::output_success(ctx.snapshot().by_column(sort))?;
        }
    }
    Ok(())
}

/// Columns are fixed, so listing them never touches the board file.
pub fn handle_columns(action: ColumnAction) -> anyhow::Result<()> {
    match action {
        ColumnAction::List => output::output_list(COLUMNS.to_vec()),
    }
}

fn parse_sort(s: &str) -> Result<ColumnSort, String> {
    match s.trim().to_lowercase().as_str() {
        "position" => Ok(ColumnSort::Position),
        "priority" => Ok(ColumnSort::Priority),
        _ => Err(format!(
            "Invalid sort '{}'. Valid values: position, priority",
            s
        )),
    }
}
