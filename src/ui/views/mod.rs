pub mod portal;
pub mod setup;
pub mod olimpiadas;
pub mod participantes;
pub mod turmas;
pub mod metricas;
pub mod admin;

pub use portal::PortalView;
pub use setup::SetupView;
pub use olimpiadas::OlimpiadasView;
pub use participantes::ParticipantesView;
pub use turmas::TurmasView;
pub use metricas::MetricasView;
pub use admin::AdminView;
