//! Entry collection from static routes and active listings.

use time::OffsetDateTime;

use crate::application::profile::SiteProfile;
use crate::domain::entities::{ProjectRecord, ServiceRecord};
use crate::domain::error::DomainError;
use crate::domain::sitemap::{Priority, SitemapEntry};
use crate::domain::types::ChangeFrequency;

struct StaticRoute {
    path: &'static str,
    priority: Priority,
    frequency: ChangeFrequency,
}

const STATIC_ROUTES: [StaticRoute; 5] = [
    StaticRoute {
        path: "/",
        priority: Priority::from_tenths(10),
        frequency: ChangeFrequency::Daily,
    },
    StaticRoute {
        path: "/about",
        priority: Priority::from_tenths(8),
        frequency: ChangeFrequency::Monthly,
    },
    StaticRoute {
        path: "/services",
        priority: Priority::from_tenths(9),
        frequency: ChangeFrequency::Weekly,
    },
    StaticRoute {
        path: "/projects",
        priority: Priority::from_tenths(9),
        frequency: ChangeFrequency::Weekly,
    },
    StaticRoute {
        path: "/contact",
        priority: Priority::from_tenths(7),
        frequency: ChangeFrequency::Monthly,
    },
];

const SERVICE_PRIORITY: Priority = Priority::from_tenths(7);
const PROJECT_PRIORITY: Priority = Priority::from_tenths(6);

pub fn static_entries(
    profile: &SiteProfile,
    now: OffsetDateTime,
) -> Result<Vec<SitemapEntry>, DomainError> {
    STATIC_ROUTES
        .iter()
        .map(|route| {
            Ok(SitemapEntry::new(profile.absolute_url(route.path), now)?
                .with_priority(route.priority)
                .with_change_frequency(route.frequency))
        })
        .collect()
}

pub fn service_entry(
    profile: &SiteProfile,
    service: &ServiceRecord,
) -> Result<SitemapEntry, DomainError> {
    let url = profile.absolute_url(&format!("/services/{}", service.slug));
    Ok(SitemapEntry::new(url, service.updated_at)?
        .with_priority(SERVICE_PRIORITY)
        .with_change_frequency(ChangeFrequency::Monthly)
        .with_images(image_urls(
            profile,
            service.image_url.as_deref(),
            &service.gallery,
        )))
}

pub fn project_entry(
    profile: &SiteProfile,
    project: &ProjectRecord,
) -> Result<SitemapEntry, DomainError> {
    let url = profile.absolute_url(&format!("/projects/{}", project.slug));
    Ok(SitemapEntry::new(url, project.updated_at)?
        .with_priority(PROJECT_PRIORITY)
        .with_change_frequency(ChangeFrequency::Monthly)
        .with_images(image_urls(
            profile,
            project.image_url.as_deref(),
            &project.gallery,
        )))
}

/// Primary image followed by the gallery, skipping empty slots.
fn image_urls(profile: &SiteProfile, primary: Option<&str>, gallery: &[Option<String>]) -> Vec<String> {
    primary
        .into_iter()
        .chain(gallery.iter().filter_map(|slot| slot.as_deref()))
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(|url| profile.absolute_url(url))
        .collect()
}
