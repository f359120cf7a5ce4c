use rust_decimal::Decimal;
use std::str::FromStr;

use crate::db::KeyValueStore;
use crate::error::{BillError, Result, ValidationError};
use crate::models::{Product, ProductId};
use crate::state::BillBook;

pub fn get_products<S: KeyValueStore>(book: &BillBook<S>) -> &[Product] {
    book.products()
}

/// Looks a product up by exact id, then by case-insensitive name.
pub fn find_product<'a, S: KeyValueStore>(book: &'a BillBook<S>, query: &str) -> Option<&'a Product> {
    let query = query.trim();

    book.products
        .iter()
        .find(|p| p.id.as_str() == query)
        .or_else(|| book.products.iter().find(|p| p.name.eq_ignore_ascii_case(query)))
}

pub fn add_product<S: KeyValueStore>(book: &mut BillBook<S>, name: &str, price_text: &str) -> Result<Product> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    let price = parse_price(price_text)?;

    let product = Product {
        id: ProductId::generate(),
        name: name.to_string(),
        price,
    };

    let mut products = book.products.clone();
    products.push(product.clone());
    book.commit_products(products)?;

    tracing::info!(product_id = %product.id, name = %product.name, price = %product.price, "Product added");

    Ok(product)
}

pub fn update_product_price<S: KeyValueStore>(
    book: &mut BillBook<S>,
    id: &ProductId,
    price_text: &str,
) -> Result<Product> {
    let price = parse_price(price_text)?;

    let index = book
        .products
        .iter()
        .position(|p| &p.id == id)
        .ok_or_else(|| BillError::ProductNotFound(id.clone()))?;

    let mut products = book.products.clone();
    let updated = {
        let product = &mut products[index];
        product.price = price;
        product.clone()
    };
    book.commit_products(products)?;

    tracing::info!(product_id = %id, price = %price, "Product price updated");

    Ok(updated)
}

/// Removes a product and its pending quantity entry. Returns `false` when no
/// product has that id.
pub fn delete_product<S: KeyValueStore>(book: &mut BillBook<S>, id: &ProductId) -> Result<bool> {
    if !book.products.iter().any(|p| &p.id == id) {
        tracing::debug!(product_id = %id, "Delete ignored, product not found");
        return Ok(false);
    }

    let products: Vec<Product> = book.products.iter().filter(|p| &p.id != id).cloned().collect();
    book.commit_products(products)?;
    book.session.remove(id);

    tracing::info!(product_id = %id, "Product deleted");

    Ok(true)
}

/// Parses a unit price typed by the user.
pub fn parse_price(text: &str) -> std::result::Result<Decimal, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::MissingPrice);
    }

    let price = Decimal::from_str(text).map_err(|_| ValidationError::InvalidPrice(text.to_string()))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::NegativePrice);
    }

    Ok(price.normalize())
}
