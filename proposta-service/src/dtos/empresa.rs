use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmpresaCreate {
    #[validate(length(min = 1, message = "nome é obrigatório"))]
    pub nome: String,
    pub cnpj_cpf: String,
    pub endereco: String,
    pub telefone: String,
    pub email: String,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmpresaUpdate {
    pub nome: Option<String>,
    pub cnpj_cpf: Option<String>,
    pub endereco: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub logo_url: Option<String>,
}
