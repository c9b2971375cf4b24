pub mod escola;
pub mod olimpiada;
pub mod turma;
pub mod participante;
pub mod lembrete;
pub mod usuario;
pub mod config;

pub use escola::*;
pub use olimpiada::*;
pub use turma::*;
pub use participante::*;
pub use lembrete::*;
pub use usuario::*;
pub use config::*;
