use storyboard_domain::Card;

/// Per-card last-write-wins: whichever copy has the later `updated_at` is kept.
/// Equal timestamps keep the local copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastWriteWinsResolver;

impl LastWriteWinsResolver {
    pub fn should_use_remote(&self, local: &Card, remote: &Card) -> bool {
        remote.updated_at > local.updated_at
    }

    pub fn explain_resolution(&self, local: &Card, remote: &Card) -> String {
        if remote.updated_at > local.updated_at {
            format!(
                "Remote copy of {} is newer ({} vs {}) - using remote version",
                local.id, remote.updated_at, local.updated_at
            )
        } else if remote.updated_at < local.updated_at {
            format!(
                "Local copy of {} is newer ({} vs {}) - keeping local version",
                local.id, local.updated_at, remote.updated_at
            )
        } else {
            format!("Timestamps for {} are equal - keeping local version", local.id)
        }
    }
}
