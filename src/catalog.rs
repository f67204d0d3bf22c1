//! Listing pages of aws-services.info
//!
//! Each query the server answers is one of these page kinds: where the page
//! lives, which cells of its table to read and how to label them.

use crate::extraction::{Column, ColumnSchema};
use crate::format::TableLayout;
use serde::{Deserialize, Serialize};

/// Kind of listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// All AWS services
    Services,
    /// Regions a single service is available in
    RegionsForService,
    /// All AWS regions
    Regions,
    /// Services available in a single region
    ServicesInRegion,
    /// All AWS Local Zones
    LocalZones,
    /// Services launched in the last 30 days
    LatestServices,
}

impl PageKind {
    /// Every page kind
    pub const ALL: [PageKind; 6] = [
        PageKind::Services,
        PageKind::RegionsForService,
        PageKind::Regions,
        PageKind::ServicesInRegion,
        PageKind::LocalZones,
        PageKind::LatestServices,
    ];

    /// Page name under the base URL; `None` when the caller supplies the URL
    pub fn page(&self) -> Option<&'static str> {
        match self {
            PageKind::Services => Some("services.html"),
            PageKind::Regions => Some("regions.html"),
            PageKind::LocalZones => Some("local_zones.html"),
            PageKind::LatestServices => Some("whatsnew.html"),
            PageKind::RegionsForService | PageKind::ServicesInRegion => None,
        }
    }

    /// Column schema of the page's data table
    pub fn schema(&self) -> ColumnSchema {
        use Column::{Link, Text};

        match self {
            PageKind::Services => ColumnSchema::new(vec![Text(0), Link(0), Text(1), Text(2)]),
            PageKind::Regions => {
                ColumnSchema::new(vec![Text(0), Text(1), Link(0), Text(2), Text(3)])
            }
            PageKind::RegionsForService | PageKind::LocalZones => ColumnSchema::plain(4),
            PageKind::ServicesInRegion | PageKind::LatestServices => ColumnSchema::plain(3),
        }
    }

    /// Header labels, separator and subject sentence
    pub fn layout(&self) -> TableLayout {
        match self {
            PageKind::Services => TableLayout::new(
                [
                    "Service Name",
                    "Service-in-Regions URL",
                    "Product Link",
                    "No. of Regions",
                ],
                '-',
            ),
            PageKind::RegionsForService => TableLayout::new(
                ["Region Code", "Region Name", "Date Launched", "Product Link"],
                '-',
            )
            .with_subject_template(
                "AWS service: '{subject}' is currently available in following AWS Regions:",
            ),
            PageKind::Regions => TableLayout::new(
                [
                    "Region Name",
                    "Region Code",
                    "Services-in-Region URL",
                    "#Services",
                    "#AZs",
                ],
                '-',
            ),
            PageKind::ServicesInRegion => TableLayout::new(
                ["Service Name", "Date Launched", "Product Link"],
                '-',
            )
            .with_subject_template(
                "AWS region: '{subject}' currently has following AWS Services available:",
            ),
            PageKind::LocalZones => TableLayout::new(
                [
                    "Country(City)",
                    "LZ Code",
                    "Parent Region Name",
                    "Parent Region Code",
                ],
                '-',
            ),
            PageKind::LatestServices => {
                TableLayout::new(["Service Name", "Region", "Launch Date"], '+')
            }
        }
    }
}
