use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct LoginData {
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Deserialize)]
pub(crate) struct RegisterData {
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct NewCategory {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct EditCategory {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct NewProduct {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    pub(crate) price: Decimal,
    #[serde(default)]
    pub(crate) quantity: i32,
    pub(crate) category_id: i32,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct EditProduct {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) price: Option<Decimal>,
    pub(crate) quantity: Option<i32>,
    pub(crate) category_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProductFilter {
    pub(crate) category_id: Option<i32>,
}
