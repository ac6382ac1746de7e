pub mod configuracoes;
pub mod empresa;
pub mod health;
pub mod propostas;
pub mod servicos;
