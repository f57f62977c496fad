use crate::cli::SyncAction;
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &CliContext, action: SyncAction) -> anyhow::Result<()> {
    if !ctx.has_remote() {
        anyhow::bail!(
            "No remote store configured. Set [remote] in the config file or \
             STORYBOARD_REMOTE_URL and STORYBOARD_REMOTE_KEY"
        );
    }

    match action {
        SyncAction::Pull => {
            let changed = ctx.pull().await?;
            output::output_success(serde_json::json!({
                "changed": changed,
                "count": ctx.snapshot().len(),
                "merge_policy": ctx.config.sync.merge_policy,
            }))?;
        }
        SyncAction::Push => {
            let pushed = ctx.push().await?;
            output::output_success(serde_json::json!({"pushed": pushed}))?;
        }
    }
    Ok(())
}
