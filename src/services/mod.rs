//! Serviços do Sapiens Desktop
//!
//! Regras de negócio que não pertencem nem à interface nem ao banco.

pub mod auth;
pub mod export;
pub mod inscricao;
pub mod lembretes;
pub mod relatorio;

pub use auth::{AcaoProtegida, PedidoPin, Sessao};
pub use export::ExportService;
pub use inscricao::InscricaoService;
pub use lembretes::LembreteService;
pub use relatorio::{CriterioRank, FiltroRelatorio, RelatorioService};
