//! Wire DTOs for the hosted data API.
//!
//! The hosted schema keeps its original Portuguese column names; everything
//! maps to the English domain fields here and nowhere else. Discounts are
//! flat columns on the product row and fold into the domain `Discount`
//! value on the way in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::category::{Category, CategoryId};
use crate::domain::ports::{CategoryPatch, NewCategoryRow};
use crate::domain::product::{
    Discount, DiscountKind, NewProduct, Product, ProductChanges, ProductColor, ProductVariant,
    SizeKind,
};

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryRow {
    pub id: CategoryId,
    pub nome: String,
    pub visivel: bool,
    pub parent_id: Option<CategoryId>,
    pub slug: String,
    pub descricao: Option<String>,
    pub ordem: i32,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.nome,
            visible: row.visivel,
            parent_id: row.parent_id,
            slug: row.slug,
            description: row.descricao,
            order: row.ordem,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewCategoryRowDto {
    pub nome: String,
    pub visivel: bool,
    pub parent_id: Option<CategoryId>,
    pub slug: String,
    pub descricao: Option<String>,
    pub ordem: i32,
}

impl From<NewCategoryRow> for NewCategoryRowDto {
    fn from(row: NewCategoryRow) -> Self {
        Self {
            nome: row.name,
            visivel: row.visible,
            parent_id: row.parent_id,
            slug: row.slug,
            descricao: row.description,
            ordem: row.order,
        }
    }
}

/// Column patch. Outer `None` keeps a column out of the payload entirely;
/// `Some(None)` serialises as an explicit `null`.
#[derive(Debug, Default, Serialize)]
pub(crate) struct CategoryPatchDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visivel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<CategoryId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordem: Option<i32>,
}

impl From<CategoryPatch> for CategoryPatchDto {
    fn from(patch: CategoryPatch) -> Self {
        Self {
            nome: patch.name,
            visivel: patch.visible,
            parent_id: patch.parent_id,
            slug: patch.slug,
            descricao: patch.description,
            ordem: patch.order,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum SizeKindDto {
    #[serde(rename = "roupa")]
    Clothing,
    #[serde(rename = "calcado")]
    Shoes,
}

impl From<SizeKindDto> for SizeKind {
    fn from(value: SizeKindDto) -> Self {
        match value {
            SizeKindDto::Clothing => Self::Clothing,
            SizeKindDto::Shoes => Self::Shoes,
        }
    }
}

impl From<SizeKind> for SizeKindDto {
    fn from(value: SizeKind) -> Self {
        match value {
            SizeKind::Clothing => Self::Clothing,
            SizeKind::Shoes => Self::Shoes,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum DiscountKindDto {
    #[serde(rename = "porcentagem")]
    Percentage,
    #[serde(rename = "fixo")]
    Fixed,
}

impl From<DiscountKindDto> for DiscountKind {
    fn from(value: DiscountKindDto) -> Self {
        match value {
            DiscountKindDto::Percentage => Self::Percentage,
            DiscountKindDto::Fixed => Self::Fixed,
        }
    }
}

impl From<DiscountKind> for DiscountKindDto {
    fn from(value: DiscountKind) -> Self {
        match value {
            DiscountKind::Percentage => Self::Percentage,
            DiscountKind::Fixed => Self::Fixed,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProductColorDto {
    pub nome: String,
    #[serde(default)]
    pub valor: Option<String>,
    #[serde(default)]
    pub imagem: Option<String>,
    #[serde(default)]
    pub personalizada: bool,
}

impl From<ProductColorDto> for ProductColor {
    fn from(value: ProductColorDto) -> Self {
        Self {
            name: value.nome,
            value: value.valor,
            image: value.imagem,
            custom: value.personalizada,
        }
    }
}

impl From<ProductColor> for ProductColorDto {
    fn from(value: ProductColor) -> Self {
        Self {
            nome: value.name,
            valor: value.value,
            imagem: value.image,
            personalizada: value.custom,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProductVariantDto {
    pub tamanho: String,
    #[serde(default)]
    pub cor: Option<String>,
    pub estoque: i32,
}

impl From<ProductVariantDto> for ProductVariant {
    fn from(value: ProductVariantDto) -> Self {
        Self {
            size: value.tamanho,
            color: value.cor,
            stock: value.estoque,
        }
    }
}

impl From<ProductVariant> for ProductVariantDto {
    fn from(value: ProductVariant) -> Self {
        Self {
            tamanho: value.size,
            cor: value.color,
            estoque: value.stock,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductRow {
    pub id: i64,
    pub nome: String,
    pub preco: f64,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub imagem: Option<String>,
    pub categoria_id: CategoryId,
    pub ativo: bool,
    pub visivel: bool,
    #[serde(default)]
    pub estoque: i32,
    #[serde(default)]
    pub tipo_tamanho: Option<SizeKindDto>,
    #[serde(default)]
    pub cores: Vec<ProductColorDto>,
    #[serde(default)]
    pub variantes: Vec<ProductVariantDto>,
    #[serde(default)]
    pub imagens_por_cor: bool,
    #[serde(default)]
    pub desconto_ativo: bool,
    #[serde(default)]
    pub tipo_desconto: Option<DiscountKindDto>,
    #[serde(default)]
    pub valor_desconto: Option<f64>,
    #[serde(default)]
    pub desconto_expira_em: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lancamento: bool,
    #[serde(default)]
    pub lancamento_expira_em: Option<DateTime<Utc>>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let discount = match (row.desconto_ativo, row.tipo_desconto, row.valor_desconto) {
            (true, Some(kind), Some(value)) => Some(Discount {
                kind: kind.into(),
                value,
                expires_at: row.desconto_expira_em,
            }),
            _ => None,
        };
        Self {
            id: row.id,
            name: row.nome,
            price: row.preco,
            description: row.descricao,
            image: row.imagem,
            category_id: row.categoria_id,
            active: row.ativo,
            visible: row.visivel,
            stock: row.estoque,
            size_kind: row.tipo_tamanho.map(Into::into),
            colors: row.cores.into_iter().map(Into::into).collect(),
            variants: row.variantes.into_iter().map(Into::into).collect(),
            images_required_for_colors: row.imagens_por_cor,
            discount,
            is_launch: row.lancamento,
            launch_expires_at: row.lancamento_expira_em,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewProductRowDto {
    pub nome: String,
    pub preco: f64,
    pub descricao: Option<String>,
    pub imagem: Option<String>,
    pub categoria_id: CategoryId,
    pub ativo: bool,
    pub visivel: bool,
    pub estoque: i32,
    pub tipo_tamanho: Option<SizeKindDto>,
    pub cores: Vec<ProductColorDto>,
    pub variantes: Vec<ProductVariantDto>,
    pub imagens_por_cor: bool,
    pub desconto_ativo: bool,
    pub tipo_desconto: Option<DiscountKindDto>,
    pub valor_desconto: Option<f64>,
    pub desconto_expira_em: Option<DateTime<Utc>>,
    pub lancamento: bool,
    pub lancamento_expira_em: Option<DateTime<Utc>>,
}

impl From<NewProduct> for NewProductRowDto {
    fn from(draft: NewProduct) -> Self {
        let (desconto_ativo, tipo_desconto, valor_desconto, desconto_expira_em) =
            flatten_discount(draft.discount);
        Self {
            nome: draft.name,
            preco: draft.price,
            descricao: draft.description,
            imagem: draft.image,
            categoria_id: draft.category_id,
            ativo: draft.active,
            visivel: draft.visible,
            estoque: draft.stock,
            tipo_tamanho: draft.size_kind.map(Into::into),
            cores: draft.colors.into_iter().map(Into::into).collect(),
            variantes: draft.variants.into_iter().map(Into::into).collect(),
            imagens_por_cor: draft.images_required_for_colors,
            desconto_ativo,
            tipo_desconto,
            valor_desconto,
            desconto_expira_em,
            lancamento: draft.is_launch,
            lancamento_expira_em: draft.launch_expires_at,
        }
    }
}

fn flatten_discount(
    discount: Option<Discount>,
) -> (
    bool,
    Option<DiscountKindDto>,
    Option<f64>,
    Option<DateTime<Utc>>,
) {
    match discount {
        Some(discount) => (
            true,
            Some(discount.kind.into()),
            Some(discount.value),
            discount.expires_at,
        ),
        None => (false, None, None, None),
    }
}

/// Column patch for a product row. Patching the discount always writes the
/// whole column group so a cleared discount leaves no stale values behind.
#[derive(Debug, Default, Serialize)]
pub(crate) struct ProductPatchDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preco: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagem: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visivel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estoque: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_tamanho: Option<Option<SizeKindDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cores: Option<Vec<ProductColorDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variantes: Option<Vec<ProductVariantDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagens_por_cor: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desconto_ativo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_desconto: Option<Option<DiscountKindDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valor_desconto: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desconto_expira_em: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lancamento: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lancamento_expira_em: Option<Option<DateTime<Utc>>>,
}

impl From<ProductChanges> for ProductPatchDto {
    fn from(changes: ProductChanges) -> Self {
        let mut dto = Self {
            nome: changes.name,
            preco: changes.price,
            descricao: changes.description,
            imagem: changes.image,
            categoria_id: changes.category_id,
            ativo: changes.active,
            visivel: changes.visible,
            estoque: changes.stock,
            tipo_tamanho: changes.size_kind.map(|k| k.map(Into::into)),
            cores: changes
                .colors
                .map(|c| c.into_iter().map(Into::into).collect()),
            variantes: changes
                .variants
                .map(|v| v.into_iter().map(Into::into).collect()),
            imagens_por_cor: changes.images_required_for_colors,
            lancamento: changes.is_launch,
            lancamento_expira_em: changes.launch_expires_at,
            ..Self::default()
        };
        if let Some(discount) = changes.discount {
            let (ativo, tipo, valor, expira) = flatten_discount(discount);
            dto.desconto_ativo = Some(ativo);
            dto.tipo_desconto = Some(tipo);
            dto.valor_desconto = Some(valor);
            dto.desconto_expira_em = Some(expira);
        }
        dto
    }
}
