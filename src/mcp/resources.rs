//! MCP resources
//!
//! A single static resource describing how the tools chain together.

use crate::error::McpError;
use crate::mcp::types::{ReadResourceResult, ResourceContents, ResourceDefinition};

/// URI of the tool guide resource
pub const TOOL_INFO_URI: &str = "resource://toolinfo";

const TOOL_INFO: &str = "\
This service provides the latest information about all AWS services and the AWS Regions they run in.
Use the following tools to get specific information:
\tUse 'aws_services' to list AWS services with their names, Service-in-Regions URL and product link.
\tUse 'aws_regions_for_service' with a service_regions_url to list every AWS Region that service is available in and when it launched there.
\tUse 'aws_regions' to list AWS Regions with their name, code, Services-in-Region URL, number of unique services and number of Availability Zones.
\tUse 'aws_services_in_region' with a region_services_url to list every AWS service available in that Region and when it launched there.
\tUse 'aws_localzones' to list AWS Local Zones with their country and city, Local Zone code, parent Region name and parent Region code.
\tUse 'aws_latest_services' to list AWS services released within the last 30 days with their Region and release date.
";

/// Resource registration and dispatch
pub struct ResourceRegistry;

impl ResourceRegistry {
    /// Resources advertised by resources/list
    pub fn list_resources() -> Vec<ResourceDefinition> {
        vec![ResourceDefinition {
            uri: TOOL_INFO_URI.to_string(),
            name: "toolinfo".to_string(),
            description: Some("Guide to the tools offered by this server".to_string()),
            mime_type: Some("text/plain".to_string()),
        }]
    }

    /// Read a resource by URI
    pub fn read(uri: &str) -> Result<ReadResourceResult, McpError> {
        match uri {
            TOOL_INFO_URI => Ok(ReadResourceResult {
                contents: vec![ResourceContents {
                    uri: uri.to_string(),
                    mime_type: "text/plain".to_string(),
                    text: TOOL_INFO.to_string(),
                }],
            }),
            _ => Err(McpError::ResourceNotFound(uri.to_string())),
        }
    }
}
