//! JSON-LD composition per page type.

use std::sync::Arc;

use metrics::counter;
use serde::Deserialize;
use tracing::debug;

use crate::application::profile::SiteProfile;
use crate::domain::schema::{
    BreadcrumbList, ContactPage, ContactPoint, Country, GeoCoordinates, LocalBusiness,
    Organization, OrganizationRef, Place, PostalAddress, ProjectSchema, SCHEMA_CONTEXT,
    ServiceSchema, StructuredDataSchema,
};
use crate::domain::types::PageType;

const METRIC_STRUCTURED_DATA_COMPOSED: &str = "seo_structured_data_composed_total";

/// Page-specific facts supplied by the caller for service and project pages.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageData {
    pub title: String,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub image: Option<String>,
    pub location: Option<String>,
    pub completed_at: Option<String>,
}

#[derive(Clone)]
pub struct StructuredDataService {
    profile: Arc<SiteProfile>,
}

impl StructuredDataService {
    pub fn new(profile: Arc<SiteProfile>) -> Self {
        Self { profile }
    }

    /// Organization first, then the schemas registered for `page_type`.
    ///
    /// Service and project pages contribute nothing beyond the organization
    /// unless `data` is present; unknown page types yield the organization only.
    pub fn compose(
        &self,
        page_type: &PageType,
        page_id: Option<&str>,
        data: Option<&PageData>,
    ) -> Vec<StructuredDataSchema> {
        let profile = self.profile.as_ref();
        let mut schemas = vec![StructuredDataSchema::Organization(organization(profile))];

        match (page_type, data) {
            (PageType::Home, _) => {
                schemas.push(StructuredDataSchema::LocalBusiness(local_business(profile)));
                schemas.push(breadcrumbs(profile, &[("Home", "/")]));
            }
            (PageType::Service, Some(data)) => {
                let path = PageType::Service.page_path(page_id.or(data.slug.as_deref()));
                schemas.push(StructuredDataSchema::Service(ServiceSchema {
                    context: SCHEMA_CONTEXT,
                    kind: "Service",
                    name: data.title.clone(),
                    description: data.description.clone(),
                    url: profile.absolute_url(&path),
                    image: data.image.as_deref().map(|image| profile.absolute_url(image)),
                    provider: organization_ref(profile),
                    area_served: country(profile),
                }));
                schemas.push(breadcrumbs(
                    profile,
                    &[
                        ("Home", "/"),
                        ("Services", "/services"),
                        (data.title.as_str(), path.as_str()),
                    ],
                ));
            }
            (PageType::Project, Some(data)) => {
                let path = PageType::Project.page_path(page_id.or(data.slug.as_deref()));
                schemas.push(StructuredDataSchema::Project(ProjectSchema {
                    context: SCHEMA_CONTEXT,
                    kind: "CreativeWork",
                    name: data.title.clone(),
                    description: data.description.clone(),
                    url: profile.absolute_url(&path),
                    image: data.image.as_deref().map(|image| profile.absolute_url(image)),
                    creator: organization_ref(profile),
                    location_created: data.location.clone().map(|name| Place {
                        kind: "Place",
                        name,
                    }),
                    date_created: data.completed_at.clone(),
                }));
                schemas.push(breadcrumbs(
                    profile,
                    &[
                        ("Home", "/"),
                        ("Projects", "/projects"),
                        (data.title.as_str(), path.as_str()),
                    ],
                ));
            }
            (PageType::Contact, _) => {
                schemas.push(StructuredDataSchema::ContactPage(ContactPage {
                    context: SCHEMA_CONTEXT,
                    kind: "ContactPage",
                    name: format!("Contact {}", profile.organization_name),
                    url: profile.absolute_url("/contact"),
                    description: format!(
                        "Get in touch with {} for construction services in {}",
                        profile.organization_name, profile.country_name
                    ),
                    main_entity: organization_ref(profile),
                }));
                schemas.push(breadcrumbs(profile, &[("Home", "/"), ("Contact", "/contact")]));
            }
            _ => {}
        }

        debug!(
            target = "akibeks_seo::structured_data",
            page_type = %page_type,
            schemas = schemas.len(),
            "structured data composed"
        );
        counter!(METRIC_STRUCTURED_DATA_COMPOSED).increment(1);

        schemas
    }
}

pub fn organization(profile: &SiteProfile) -> Organization {
    Organization {
        context: SCHEMA_CONTEXT,
        kind: "Organization",
        name: profile.organization_name.clone(),
        url: profile.base_url().to_string(),
        logo: profile.absolute_url(&profile.logo),
        description: profile.default_description.clone(),
        telephone: profile.telephone.clone(),
        email: profile.email.clone(),
        address: postal_address(profile),
        contact_point: ContactPoint {
            kind: "ContactPoint",
            telephone: profile.telephone.clone(),
            contact_type: "customer service".to_string(),
            area_served: profile.address.country.clone(),
            available_language: profile.available_languages.clone(),
        },
        same_as: profile.same_as.clone(),
    }
}

fn local_business(profile: &SiteProfile) -> LocalBusiness {
    LocalBusiness {
        context: SCHEMA_CONTEXT,
        kind: "LocalBusiness",
        name: profile.organization_name.clone(),
        image: profile.absolute_url(&profile.default_image),
        url: profile.base_url().to_string(),
        telephone: profile.telephone.clone(),
        email: profile.email.clone(),
        address: postal_address(profile),
        geo: GeoCoordinates {
            kind: "GeoCoordinates",
            latitude: profile.geo.latitude,
            longitude: profile.geo.longitude,
        },
        opening_hours: profile.opening_hours.clone(),
        price_range: profile.price_range.clone(),
        area_served: country(profile),
    }
}

fn postal_address(profile: &SiteProfile) -> PostalAddress {
    PostalAddress {
        kind: "PostalAddress",
        street_address: profile.address.street.clone(),
        address_locality: profile.address.locality.clone(),
        address_region: profile.address.region.clone(),
        postal_code: profile.address.postal_code.clone(),
        address_country: profile.address.country.clone(),
    }
}

fn organization_ref(profile: &SiteProfile) -> OrganizationRef {
    OrganizationRef {
        kind: "Organization",
        name: profile.organization_name.clone(),
        url: profile.base_url().to_string(),
    }
}

fn country(profile: &SiteProfile) -> Country {
    Country {
        kind: "Country",
        name: profile.country_name.clone(),
    }
}

fn breadcrumbs(profile: &SiteProfile, trail: &[(&str, &str)]) -> StructuredDataSchema {
    StructuredDataSchema::BreadcrumbList(BreadcrumbList::from_trail(
        trail
            .iter()
            .map(|(name, path)| (name.to_string(), profile.absolute_url(path))),
    ))
}
