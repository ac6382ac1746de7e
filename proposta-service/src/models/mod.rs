pub mod configuracao;
pub mod empresa;
pub mod proposta;
pub mod servico;

pub use configuracao::Configuracao;
pub use empresa::DadosEmpresa;
pub use proposta::{
    CalculoProposta, DescontoTipo, ItemProposta, OrdenacaoProposta, Proposta, PropostaFilter,
    StatusProposta,
};
pub use servico::{CategoriaResumo, Servico, TipoAtendimento, TipoCobranca};
