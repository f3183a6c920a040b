//! GraphQL operations for the Shopify Admin API.
//!
//! Each operation implements `graphql_client::GraphQLQuery` by hand: the
//! document lives next to its `Variables`/`ResponseData` types in a module
//! named after the operation, so the bridge needs no checked-in schema.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::{Deserialize, Serialize};

macro_rules! operation {
    ($name:ident, $module:ident, $operation_name:literal) => {
        pub struct $name;

        impl GraphQLQuery for $name {
            type Variables = $module::Variables;
            type ResponseData = $module::ResponseData;

            fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
                QueryBody {
                    variables,
                    query: $module::QUERY,
                    operation_name: $operation_name,
                }
            }
        }
    };
}

// =============================================================================
// Shared shapes
// =============================================================================

/// Cursor pagination state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// A mutation `userErrors` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct UserError {
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// A created or updated resource, by id.
#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    pub id: String,
}

// =============================================================================
// Collections
// =============================================================================

operation!(GetCollections, get_collections, "GetCollections");
operation!(CollectionCreate, collection_create, "CollectionCreate");
operation!(CollectionUpdate, collection_update, "CollectionUpdate");

pub mod get_collections {
    use super::{Deserialize, PageInfo, Serialize};

    pub const QUERY: &str = r"
query GetCollections($first: Int!, $after: String) {
  collections(first: $first, after: $after) {
    pageInfo { hasNextPage endCursor }
    nodes { id title handle }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
        pub after: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collections: Collections,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Collections {
        pub page_info: PageInfo,
        pub nodes: Vec<CollectionNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CollectionNode {
        pub id: String,
        pub title: String,
        pub handle: String,
    }
}

/// `CollectionInput` shared by create and update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description_html: String,
    pub seo: SeoInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageInput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeoInput {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageInput {
    pub src: String,
}

pub mod collection_create {
    use super::{CollectionInput, Deserialize, Node, Serialize, UserError};

    pub const QUERY: &str = r"
mutation CollectionCreate($input: CollectionInput!) {
  collectionCreate(input: $input) {
    collection { id }
    userErrors { field message }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub input: CollectionInput,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub collection_create: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub collection: Option<Node>,
        pub user_errors: Vec<UserError>,
    }
}

pub mod collection_update {
    use super::{CollectionInput, Deserialize, Node, Serialize, UserError};

    pub const QUERY: &str = r"
mutation CollectionUpdate($input: CollectionInput!) {
  collectionUpdate(input: $input) {
    collection { id }
    userErrors { field message }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub input: CollectionInput,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub collection_update: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub collection: Option<Node>,
        pub user_errors: Vec<UserError>,
    }
}

// =============================================================================
// Publications
// =============================================================================

operation!(GetPublications, get_publications, "GetPublications");
operation!(PublishablePublish, publishable_publish, "PublishablePublish");

pub mod get_publications {
    use super::{Deserialize, Serialize};

    pub const QUERY: &str = r"
query GetPublications($first: Int!) {
  publications(first: $first) {
    nodes { id name }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub publications: Publications,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Publications {
        pub nodes: Vec<PublicationNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct PublicationNode {
        pub id: String,
        pub name: String,
    }
}

pub mod publishable_publish {
    use super::{Deserialize, Serialize, UserError};

    pub const QUERY: &str = r"
mutation PublishablePublish($id: ID!, $input: [PublicationInput!]!) {
  publishablePublish(id: $id, input: $input) {
    userErrors { field message }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub id: String,
        pub input: Vec<PublicationInput>,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PublicationInput {
        pub publication_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub publishable_publish: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub user_errors: Vec<UserError>,
    }
}

// =============================================================================
// Metafield definitions
// =============================================================================

operation!(
    GetMetafieldDefinitions,
    get_metafield_definitions,
    "GetMetafieldDefinitions"
);
operation!(
    MetafieldDefinitionCreate,
    metafield_definition_create,
    "MetafieldDefinitionCreate"
);

pub mod get_metafield_definitions {
    use super::{Deserialize, PageInfo, Serialize};

    pub const QUERY: &str = r"
query GetMetafieldDefinitions($namespace: String!, $ownerType: MetafieldOwnerType!, $first: Int!, $after: String) {
  metafieldDefinitions(namespace: $namespace, ownerType: $ownerType, first: $first, after: $after) {
    pageInfo { hasNextPage endCursor }
    nodes { namespace key }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub namespace: String,
        pub owner_type: String,
        pub first: i64,
        pub after: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub metafield_definitions: Definitions,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Definitions {
        pub page_info: PageInfo,
        pub nodes: Vec<DefinitionNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct DefinitionNode {
        pub namespace: String,
        pub key: String,
    }
}

pub mod metafield_definition_create {
    use magbridge_core::MetafieldDefinitionSpec;

    use super::{Deserialize, Node, Serialize, UserError};

    pub const QUERY: &str = r"
mutation MetafieldDefinitionCreate($definition: MetafieldDefinitionInput!) {
  metafieldDefinitionCreate(definition: $definition) {
    createdDefinition { id }
    userErrors { field message }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub definition: MetafieldDefinitionSpec,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub metafield_definition_create: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub created_definition: Option<Node>,
        pub user_errors: Vec<UserError>,
    }
}

// =============================================================================
// Metaobjects
// =============================================================================

operation!(
    GetMetaobjectDefinitionByType,
    get_metaobject_definition_by_type,
    "GetMetaobjectDefinitionByType"
);
operation!(
    MetaobjectDefinitionCreate,
    metaobject_definition_create,
    "MetaobjectDefinitionCreate"
);
operation!(
    MetaobjectDefinitionUpdate,
    metaobject_definition_update,
    "MetaobjectDefinitionUpdate"
);
operation!(GetMetaobjects, get_metaobjects, "GetMetaobjects");
operation!(MetaobjectCreate, metaobject_create, "MetaobjectCreate");

/// Access levels on a metaobject definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaobjectAccess {
    pub admin: Option<String>,
    pub storefront: Option<String>,
}

/// A `{ key, value }` field pair used by metaobject inputs and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldValue {
    pub key: String,
    pub value: Option<String>,
}

pub mod get_metaobject_definition_by_type {
    use super::{Deserialize, MetaobjectAccess, Serialize};

    pub const QUERY: &str = r"
query GetMetaobjectDefinitionByType($type: String!) {
  metaobjectDefinitionByType(type: $type) {
    id
    type
    displayNameKey
    access { admin storefront }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        #[serde(rename = "type")]
        pub kind: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub metaobject_definition_by_type: Option<DefinitionNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DefinitionNode {
        pub id: String,
        #[serde(rename = "type")]
        pub kind: String,
        pub display_name_key: Option<String>,
        pub access: Option<MetaobjectAccess>,
    }
}

/// Field definition on a metaobject definition.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDefinitionInput {
    pub key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

pub mod metaobject_definition_create {
    use super::{Deserialize, FieldDefinitionInput, MetaobjectAccess, Node, Serialize, UserError};

    pub const QUERY: &str = r"
mutation MetaobjectDefinitionCreate($definition: MetaobjectDefinitionCreateInput!) {
  metaobjectDefinitionCreate(definition: $definition) {
    metaobjectDefinition { id }
    userErrors { field message }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub definition: DefinitionInput,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DefinitionInput {
        #[serde(rename = "type")]
        pub kind: String,
        pub name: String,
        pub display_name_key: String,
        pub access: MetaobjectAccess,
        pub field_definitions: Vec<FieldDefinitionInput>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub metaobject_definition_create: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub metaobject_definition: Option<Node>,
        pub user_errors: Vec<UserError>,
    }
}

pub mod metaobject_definition_update {
    use super::{Deserialize, MetaobjectAccess, Node, Serialize, UserError};

    pub const QUERY: &str = r"
mutation MetaobjectDefinitionUpdate($id: ID!, $definition: MetaobjectDefinitionUpdateInput!) {
  metaobjectDefinitionUpdate(id: $id, definition: $definition) {
    metaobjectDefinition { id }
    userErrors { field message }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub id: String,
        pub definition: DefinitionInput,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DefinitionInput {
        pub display_name_key: String,
        pub access: MetaobjectAccess,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub metaobject_definition_update: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub metaobject_definition: Option<Node>,
        pub user_errors: Vec<UserError>,
    }
}

pub mod get_metaobjects {
    use super::{Deserialize, FieldValue, PageInfo, Serialize};

    pub const QUERY: &str = r"
query GetMetaobjects($type: String!, $first: Int!, $after: String) {
  metaobjects(type: $type, first: $first, after: $after) {
    pageInfo { hasNextPage endCursor }
    nodes {
      id
      fields { key value }
    }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        #[serde(rename = "type")]
        pub kind: String,
        pub first: i64,
        pub after: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub metaobjects: Metaobjects,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Metaobjects {
        pub page_info: PageInfo,
        pub nodes: Vec<MetaobjectNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct MetaobjectNode {
        pub id: String,
        pub fields: Vec<FieldValue>,
    }
}

pub mod metaobject_create {
    use super::{Deserialize, FieldValue, Node, Serialize, UserError};

    pub const QUERY: &str = r"
mutation MetaobjectCreate($metaobject: MetaobjectCreateInput!) {
  metaobjectCreate(metaobject: $metaobject) {
    metaobject { id }
    userErrors { field message }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub metaobject: MetaobjectInput,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct MetaobjectInput {
        #[serde(rename = "type")]
        pub kind: String,
        pub fields: Vec<FieldValue>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub metaobject_create: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub metaobject: Option<Node>,
        pub user_errors: Vec<UserError>,
    }
}

// =============================================================================
// Products
// =============================================================================

operation!(ProductCreate, product_create, "ProductCreate");
operation!(ProductUpdate, product_update, "ProductUpdate");
operation!(
    ProductVariantsBulkUpdate,
    product_variants_bulk_update,
    "ProductVariantsBulkUpdate"
);
operation!(GetProductMedia, get_product_media, "GetProductMedia");
operation!(ProductDeleteMedia, product_delete_media, "ProductDeleteMedia");
operation!(ProductCreateMedia, product_create_media, "ProductCreateMedia");

/// Product fields shared by create and update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description_html: String,
    pub seo: SeoInput,
}

/// A product with its default variant, as returned by create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductNode {
    pub id: String,
    pub variants: VariantNodes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantNodes {
    pub nodes: Vec<VariantNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantNode {
    pub id: String,
    pub inventory_item: Option<Node>,
}

pub mod product_create {
    use super::{Deserialize, ProductInput, ProductNode, Serialize, UserError};

    pub const QUERY: &str = r"
mutation ProductCreate($product: ProductCreateInput!) {
  productCreate(product: $product) {
    product {
      id
      variants(first: 1) { nodes { id inventoryItem { id } } }
    }
    userErrors { field message }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub product: ProductInput,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_create: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub product: Option<ProductNode>,
        pub user_errors: Vec<UserError>,
    }
}

pub mod product_update {
    use super::{Deserialize, ProductInput, ProductNode, Serialize, UserError};

    pub const QUERY: &str = r"
mutation ProductUpdate($product: ProductUpdateInput!) {
  productUpdate(product: $product) {
    product {
      id
      variants(first: 1) { nodes { id inventoryItem { id } } }
    }
    userErrors { field message }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub product: ProductInput,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_update: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub product: Option<ProductNode>,
        pub user_errors: Vec<UserError>,
    }
}

pub mod product_variants_bulk_update {
    use super::{Deserialize, Serialize, UserError};

    pub const QUERY: &str = r"
mutation ProductVariantsBulkUpdate($productId: ID!, $variants: [ProductVariantsBulkInput!]!) {
  productVariantsBulkUpdate(productId: $productId, variants: $variants) {
    userErrors { field message }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub product_id: String,
        pub variants: Vec<VariantPriceInput>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct VariantPriceInput {
        pub id: String,
        pub price: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_variants_bulk_update: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub user_errors: Vec<UserError>,
    }
}

pub mod get_product_media {
    use super::{Deserialize, Serialize};

    pub const QUERY: &str = r"
query GetProductMedia($id: ID!) {
  product(id: $id) {
    media(first: 250) {
      nodes {
        __typename
        ... on MediaImage { id }
      }
    }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<ProductMedia>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductMedia {
        pub media: MediaNodes,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct MediaNodes {
        pub nodes: Vec<MediaNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct MediaNode {
        #[serde(rename = "__typename")]
        pub typename: String,
        pub id: Option<String>,
    }
}

pub mod product_delete_media {
    use super::{Deserialize, Serialize, UserError};

    pub const QUERY: &str = r"
mutation ProductDeleteMedia($productId: ID!, $mediaIds: [ID!]!) {
  productDeleteMedia(productId: $productId, mediaIds: $mediaIds) {
    deletedMediaIds
    userErrors { field message }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub product_id: String,
        pub media_ids: Vec<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_delete_media: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub deleted_media_ids: Option<Vec<String>>,
        pub user_errors: Vec<UserError>,
    }
}

pub mod product_create_media {
    use super::{Deserialize, Serialize, UserError};

    pub const QUERY: &str = r"
mutation ProductCreateMedia($productId: ID!, $media: [CreateMediaInput!]!) {
  productCreateMedia(productId: $productId, media: $media) {
    userErrors { field message }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub product_id: String,
        pub media: Vec<CreateMediaInput>,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateMediaInput {
        pub media_content_type: &'static str,
        pub original_source: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_create_media: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub user_errors: Vec<UserError>,
    }
}

// =============================================================================
// Inventory
// =============================================================================

operation!(GetLocations, get_locations, "GetLocations");
operation!(InventoryItemUpdate, inventory_item_update, "InventoryItemUpdate");
operation!(InventoryActivate, inventory_activate, "InventoryActivate");
operation!(
    InventorySetOnHandQuantities,
    inventory_set_on_hand_quantities,
    "InventorySetOnHandQuantities"
);

pub mod get_locations {
    use super::{Deserialize, Serialize};

    pub const QUERY: &str = r"
query GetLocations($first: Int!) {
  locations(first: $first) {
    nodes { id name }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub locations: Locations,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Locations {
        pub nodes: Vec<LocationNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct LocationNode {
        pub id: String,
        pub name: String,
    }
}

pub mod inventory_item_update {
    use super::{Deserialize, Serialize, UserError};

    pub const QUERY: &str = r"
mutation InventoryItemUpdate($id: ID!, $input: InventoryItemInput!) {
  inventoryItemUpdate(id: $id, input: $input) {
    inventoryItem { id sku }
    userErrors { field message }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub id: String,
        pub input: InventoryItemInput,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct InventoryItemInput {
        pub sku: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub inventory_item_update: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub user_errors: Vec<UserError>,
    }
}

pub mod inventory_activate {
    use super::{Deserialize, Serialize, UserError};

    pub const QUERY: &str = r"
mutation InventoryActivate($inventoryItemId: ID!, $locationId: ID!) {
  inventoryActivate(inventoryItemId: $inventoryItemId, locationId: $locationId) {
    userErrors { field message }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub inventory_item_id: String,
        pub location_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub inventory_activate: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub user_errors: Vec<UserError>,
    }
}

pub mod inventory_set_on_hand_quantities {
    use super::{Deserialize, Serialize, UserError};

    pub const QUERY: &str = r"
mutation InventorySetOnHandQuantities($input: InventorySetOnHandQuantitiesInput!) {
  inventorySetOnHandQuantities(input: $input) {
    userErrors { field message }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub input: Input,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Input {
        pub reason: &'static str,
        pub set_quantities: Vec<SetQuantity>,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SetQuantity {
        pub inventory_item_id: String,
        pub location_id: String,
        pub quantity: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub inventory_set_on_hand_quantities: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub user_errors: Vec<UserError>,
    }
}
