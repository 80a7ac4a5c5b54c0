//! Todo Endpoints

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{Todo, TodoCreate, TodoUpdate};

pub async fn list_todos(client: &ApiClient) -> ApiResult<Vec<Todo>> {
    client.get("/todos").await
}

pub async fn get_todo(client: &ApiClient, id: u32) -> ApiResult<Todo> {
    client.get(&format!("/todos/{}", id)).await
}

pub async fn create_todo(client: &ApiClient, todo: &TodoCreate) -> ApiResult<()> {
    client.post_json("/todos", todo).await?;
    Ok(())
}

pub async fn update_todo(client: &ApiClient, id: u32, todo: &TodoUpdate) -> ApiResult<()> {
    client.patch_json(&format!("/todos/{}", id), todo).await?;
    Ok(())
}

pub async fn delete_todo(client: &ApiClient, id: u32) -> ApiResult<()> {
    client.delete(&format!("/todos/{}", id)).await?;
    Ok(())
}
