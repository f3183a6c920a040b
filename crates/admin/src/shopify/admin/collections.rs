//! Collection and publication calls.

use tracing::instrument;

use super::{AdminClient, PAGE_SIZE, check_user_errors, missing, queries};
use crate::shopify::{
    AdminShopifyError, CollectionFields, CollectionSummary, ONLINE_STORE_PUBLICATION, Publication,
};

impl AdminClient {
    /// Every collection in the store, following pagination to the end.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn list_all_collections(&self) -> Result<Vec<CollectionSummary>, AdminShopifyError> {
        let mut collections = Vec::new();
        let mut after = None;

        loop {
            let variables = queries::get_collections::Variables {
                first: PAGE_SIZE,
                after,
            };
            let response = self.execute::<queries::GetCollections>(variables).await?;
            let page = response.collections;

            collections.extend(page.nodes.into_iter().map(|c| CollectionSummary {
                id: c.id,
                title: c.title,
                handle: c.handle,
            }));

            match page.page_info.end_cursor {
                Some(cursor) if page.page_info.has_next_page => after = Some(cursor),
                _ => break,
            }
        }

        tracing::debug!(count = collections.len(), "Fetched live collections");
        Ok(collections)
    }

    /// Create a collection and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns user errors.
    #[instrument(skip(self, fields), fields(title = %fields.title))]
    pub async fn create_collection(
        &self,
        fields: &CollectionFields,
    ) -> Result<String, AdminShopifyError> {
        let variables = queries::collection_create::Variables {
            input: collection_input(None, fields),
        };

        let response = self.execute::<queries::CollectionCreate>(variables).await?;
        let payload = response
            .collection_create
            .ok_or_else(|| missing("collectionCreate payload"))?;
        check_user_errors(&payload.user_errors)?;

        payload
            .collection
            .map(|c| c.id)
            .ok_or_else(|| missing("collection from create"))
    }

    /// Overwrite an existing collection's fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns user errors.
    #[instrument(skip(self, fields), fields(collection_id = %id))]
    pub async fn update_collection(
        &self,
        id: &str,
        fields: &CollectionFields,
    ) -> Result<String, AdminShopifyError> {
        let variables = queries::collection_update::Variables {
            input: collection_input(Some(id.to_string()), fields),
        };

        let response = self.execute::<queries::CollectionUpdate>(variables).await?;
        let payload = response
            .collection_update
            .ok_or_else(|| missing("collectionUpdate payload"))?;
        check_user_errors(&payload.user_errors)?;

        payload
            .collection
            .map(|c| c.id)
            .ok_or_else(|| missing("collection from update"))
    }

    /// Sales channel publications of the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_publications(&self) -> Result<Vec<Publication>, AdminShopifyError> {
        let variables = queries::get_publications::Variables { first: 20 };
        let response = self.execute::<queries::GetPublications>(variables).await?;

        Ok(response
            .publications
            .nodes
            .into_iter()
            .map(|p| Publication {
                id: p.id,
                name: p.name,
            })
            .collect())
    }

    /// Publish a resource to one publication.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns user errors.
    #[instrument(skip(self))]
    pub async fn publish(
        &self,
        resource_id: &str,
        publication_id: &str,
    ) -> Result<(), AdminShopifyError> {
        let variables = queries::publishable_publish::Variables {
            id: resource_id.to_string(),
            input: vec![queries::publishable_publish::PublicationInput {
                publication_id: publication_id.to_string(),
            }],
        };

        let response = self.execute::<queries::PublishablePublish>(variables).await?;

        if let Some(payload) = response.publishable_publish {
            check_user_errors(&payload.user_errors)?;
        }

        Ok(())
    }

    /// Publish a collection or product to the Online Store channel.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the store has no Online Store publication.
    #[instrument(skip(self))]
    pub async fn publish_to_online_store(
        &self,
        resource_id: &str,
    ) -> Result<(), AdminShopifyError> {
        let publications = self.get_publications().await?;
        let online_store = find_publication(&publications, ONLINE_STORE_PUBLICATION)
            .ok_or_else(|| {
                AdminShopifyError::NotFound(format!("publication {ONLINE_STORE_PUBLICATION}"))
            })?;

        self.publish(resource_id, &online_store.id).await
    }
}

fn collection_input(id: Option<String>, fields: &CollectionFields) -> queries::CollectionInput {
    queries::CollectionInput {
        id,
        title: fields.title.clone(),
        description_html: fields.description_html.clone(),
        seo: queries::SeoInput {
            title: fields.seo_title.clone(),
            description: fields.seo_description.clone(),
        },
        image: fields
            .image_src
            .clone()
            .map(|src| queries::ImageInput { src }),
    }
}

fn find_publication<'a>(publications: &'a [Publication], name: &str) -> Option<&'a Publication> {
    publications.iter().find(|p| p.name == name)
}
