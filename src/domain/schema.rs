//! schema.org JSON-LD documents emitted for public pages.
//!
//! Each document carries its own `@context` and `@type`, so a composed list
//! can be embedded either as separate `<script type="application/ld+json">`
//! blocks or as a single JSON array.

use serde::Serialize;

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredDataSchema {
    Organization(Organization),
    LocalBusiness(LocalBusiness),
    Service(ServiceSchema),
    Project(ProjectSchema),
    BreadcrumbList(BreadcrumbList),
    ContactPage(ContactPage),
}

impl StructuredDataSchema {
    pub fn schema_type(&self) -> &'static str {
        match self {
            StructuredDataSchema::Organization(schema) => schema.kind,
            StructuredDataSchema::LocalBusiness(schema) => schema.kind,
            StructuredDataSchema::Service(schema) => schema.kind,
            StructuredDataSchema::Project(schema) => schema.kind,
            StructuredDataSchema::BreadcrumbList(schema) => schema.kind,
            StructuredDataSchema::ContactPage(schema) => schema.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub street_address: String,
    pub address_locality: String,
    pub address_region: String,
    pub postal_code: String,
    pub address_country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoCoordinates {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub telephone: String,
    pub contact_type: String,
    pub area_served: String,
    pub available_language: Vec<String>,
}

/// Reference to the publishing organization from within another document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationRef {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Country {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub url: String,
    pub logo: String,
    pub description: String,
    pub telephone: String,
    pub email: String,
    pub address: PostalAddress,
    pub contact_point: ContactPoint,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalBusiness {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub image: String,
    pub url: String,
    pub telephone: String,
    pub email: String,
    pub address: PostalAddress,
    pub geo: GeoCoordinates,
    pub opening_hours: Vec<String>,
    pub price_range: String,
    pub area_served: Country,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub provider: OrganizationRef,
    pub area_served: Country,
}

/// Portfolio project, published as a schema.org `CreativeWork`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub creator: OrganizationRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_created: Option<Place>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub position: u32,
    pub name: String,
    pub item: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbList {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub item_list_element: Vec<ListItem>,
}

impl BreadcrumbList {
    /// Build a trail from `(name, absolute url)` pairs; positions are 1-based.
    pub fn from_trail<I>(trail: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let item_list_element = trail
            .into_iter()
            .zip(1u32..)
            .map(|((name, item), position)| ListItem {
                kind: "ListItem",
                position,
                name,
                item,
            })
            .collect();

        Self {
            context: SCHEMA_CONTEXT,
            kind: "BreadcrumbList",
            item_list_element,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPage {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub url: String,
    pub description: String,
    pub main_entity: OrganizationRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breadcrumb_positions_follow_trail_order() {
        let list = BreadcrumbList::from_trail([
            ("Home".to_string(), "https://example.com/".to_string()),
            ("Contact".to_string(), "https://example.com/contact".to_string()),
        ]);
        let positions: Vec<u32> = list.item_list_element.iter().map(|i| i.position).collect();
        assert_eq!(positions, vec![1, 2]);

        let json = serde_json::to_value(StructuredDataSchema::BreadcrumbList(list)).unwrap();
        assert_eq!(json["@type"], "BreadcrumbList");
        assert_eq!(json["@context"], SCHEMA_CONTEXT);
        assert_eq!(json["itemListElement"][1]["item"], "https://example.com/contact");
    }
}
