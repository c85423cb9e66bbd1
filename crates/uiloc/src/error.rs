use thiserror::Error;

/// Failures of the engine's query and switch surfaces.
///
/// Expected conditions are deliberately not here: an unknown language is a
/// no-op switch, an unknown uid resolves to a configured fallback and a
/// dropped element is pruned silently. These variants carry genuinely
/// unexpected faults, each wrapping its cause exactly once.
#[derive(Debug, Error)]
pub enum LocalizationError {
    /// Enumerating the registered languages failed.
    #[error("failed to enumerate available languages")]
    Query {
        #[source]
        source: anyhow::Error,
    },

    /// A language switch failed mid-protocol. The active dictionary stays
    /// wherever the switch got to; there is no rollback.
    #[error("failed to switch language from '{previous}' to '{target}'")]
    SetLanguage {
        previous: String,
        target: String,
        #[source]
        source: anyhow::Error,
    },

    /// Resolving or applying localized values for a uid failed.
    #[error("failed to resolve localized values for uid '{uid}'")]
    Lookup {
        uid: String,
        #[source]
        source: anyhow::Error,
    },
}
