use jardine_shared::Error;
use jardine_shared::recipe::{RecipeFields, RecipeImporter};
use serde::Serialize;

use crate::client::{Client, send};

#[derive(Serialize)]
struct ImportRequest<'a> {
    url: &'a str,
}

#[async_trait::async_trait]
impl RecipeImporter for Client {
    async fn import_recipe(&self, url: &str) -> jardine_shared::Result<RecipeFields> {
        let request = self.post("import-recipe").json(&ImportRequest { url });
        let response = send(request, Error::Import, false).await?;

        response
            .json::<RecipeFields>()
            .await
            .map_err(|err| Error::Import(format!("unexpected import response: {err}")))
    }
}
