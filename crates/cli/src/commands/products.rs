//! Product inspection commands.

use shop_catalog_admin::db::ProductRepository;
use shop_catalog_admin::models::Product;

use super::{CommandError, connect};

/// Print every product as a tab-separated table.
///
/// # Errors
///
/// Returns `CommandError` if the database cannot be read.
pub async fn list() -> Result<(), CommandError> {
    let (_, pool) = connect().await?;
    let products = ProductRepository::new(&pool).list().await?;

    #[allow(clippy::print_stdout)]
    {
        println!("id\tname\tprice\timage");
        for product in &products {
            println!("{}", format_row(product));
        }
    }

    tracing::info!(count = products.len(), "Listed products");
    Ok(())
}

fn format_row(product: &Product) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        product.id,
        product.name,
        product.price,
        product.image.as_ref().map_or("-", |image| image.as_str())
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shop_catalog_admin::models::ProductFields;
    use shop_catalog_core::{AssetName, Price, ProductId};

    use super::*;

    #[tokio::test]
    async fn test_format_row() {
        let pool = shop_catalog_admin::db::create_memory_pool().await.unwrap();
        shop_catalog_admin::db::run_migrations(&pool).await.unwrap();
        let repo = ProductRepository::new(&pool);

        let fields = ProductFields {
            name: "Mug".to_string(),
            description: String::new(),
            price: Price::parse("9.99").unwrap(),
        };
        let with_image = repo
            .create(&fields, Some(&AssetName::parse("a.png").unwrap()))
            .await
            .unwrap();
        let without_image = repo.create(&fields, None).await.unwrap();
        assert_eq!(with_image, ProductId::new(1));

        let row = format_row(&repo.get(with_image).await.unwrap().unwrap());
        assert_eq!(row, "1\tMug\t9.99\ta.png");

        let row = format_row(&repo.get(without_image).await.unwrap().unwrap());
        assert_eq!(row, "2\tMug\t9.99\t-");
    }
}
