use super::participants_model::Participant;

/// Resolves linked identities to display names.
///
/// Implemented by whatever owns the friend/user directory. The allocation
/// math never looks at identities.
pub trait IdentityDirectoryTrait: Send + Sync {
    fn display_name(&self, identity: &str) -> Option<String>;
}

/// Name to show for a participant: the directory's name for its linked
/// identity when known, else the participant's own name.
pub fn resolve_display_name(
    participant: &Participant,
    directory: Option<&dyn IdentityDirectoryTrait>,
) -> String {
    participant
        .linked_identity
        .as_deref()
        .zip(directory)
        .and_then(|(identity, directory)| directory.display_name(identity))
        .unwrap_or_else(|| participant.name.clone())
}
