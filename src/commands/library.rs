use super::{toast, CliError};
use crate::api::ApiClient;
use crate::library::Category;
use crate::render;
use std::path::Path;

pub async fn list(client: &ApiClient, category: Category) -> Result<(), CliError> {
    let documents = client.list_documents(category.filter()).await?;
    if documents.is_empty() {
        println!("No documents found.");
    }
    for doc in &documents {
        println!("{}", render::document(doc));
    }
    Ok(())
}

/// Upload failures are reported as a notification and an error exit.
pub async fn upload(
    client: &ApiClient,
    path: &Path,
    category: Option<Category>,
) -> Result<(), CliError> {
    toast("Uploading document...");
    match client.upload(path, category.and_then(Category::filter)).await {
        Ok(_) => {
            toast("Uploaded successfully!");
            Ok(())
        }
        Err(e) => {
            toast("Upload failed.");
            Err(e.into())
        }
    }
}
