use jardine_shared::Error;
use jardine_shared::shopping::{
    IngredientAggregator, IngredientList, RecipeIngredients, ShoppingItem,
};
use serde::{Deserialize, Serialize};

use crate::client::{Client, send};

#[derive(Serialize)]
struct AggregateRequest<'a> {
    recipes: &'a [RecipeIngredients],
}

/// Shapes the aggregation function has been seen to answer with.
#[derive(Deserialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum AggregateResponse {
    Items(Vec<ShoppingItem>),
    Text(String),
    WrappedItems { items: Vec<ShoppingItem> },
    WrappedText { text: String },
}

impl From<AggregateResponse> for IngredientList {
    fn from(value: AggregateResponse) -> Self {
        match value {
            AggregateResponse::Items(items) | AggregateResponse::WrappedItems { items } => {
                IngredientList::Items(items)
            }
            AggregateResponse::Text(text) | AggregateResponse::WrappedText { text } => {
                IngredientList::Text(text)
            }
        }
    }
}

#[async_trait::async_trait]
impl IngredientAggregator for Client {
    async fn aggregate_ingredients(
        &self,
        recipes: &[RecipeIngredients],
    ) -> jardine_shared::Result<IngredientList> {
        let request = self
            .post("aggregate-ingredients")
            .json(&AggregateRequest { recipes });
        let response = send(request, Error::Aggregation, false).await?;

        let body = response
            .json::<AggregateResponse>()
            .await
            .map_err(|err| Error::Aggregation(format!("unexpected aggregation response: {err}")))?;

        Ok(body.into())
    }
}
