//! MCP tool definitions and registry
//!
//! Every tool answers one listing query. Fixed listings take no arguments;
//! detail listings take the URL found in a link column of a fixed listing.

use crate::catalog::PageKind;
use crate::mcp::types::{McpToolDefinition, ToolCallResult};
use crate::service::AwsRands;
use serde_json::{json, Value};
use tracing::{error, info, instrument};

/// A registered MCP tool
pub trait McpTool: Send + Sync {
    /// Tool name
    fn name(&self) -> &str;
    /// Tool description
    fn description(&self) -> &str;
    /// Listing the tool answers
    fn page_kind(&self) -> PageKind;
    /// Name of the required URL argument, if the listing needs one
    fn url_argument(&self) -> Option<&str> {
        None
    }
    /// Input schema as JSON
    fn input_schema(&self) -> Value {
        match self.url_argument() {
            Some(arg) => {
                let mut properties = serde_json::Map::new();
                properties.insert(
                    arg.to_string(),
                    json!({
                        "type": "string",
                        "description": "Detail page URL taken from a previous listing"
                    }),
                );
                json!({
                    "type": "object",
                    "properties": properties,
                    "required": [arg]
                })
            }
            None => json!({
                "type": "object",
                "properties": {}
            }),
        }
    }
    /// Get tool definition
    fn definition(&self) -> McpToolDefinition {
        McpToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Tool registry holding all available tools
pub struct ToolRegistry {
    tools: Vec<Box<dyn McpTool>>,
    service: AwsRands,
}

impl ToolRegistry {
    /// Create a new tool registry with all built-in tools
    pub fn new(service: AwsRands) -> Self {
        let mut registry = Self {
            tools: Vec::new(),
            service,
        };

        registry.register(Box::new(AwsServicesTool));
        registry.register(Box::new(AwsRegionsForServiceTool));
        registry.register(Box::new(AwsRegionsTool));
        registry.register(Box::new(AwsServicesInRegionTool));
        registry.register(Box::new(AwsLocalZonesTool));
        registry.register(Box::new(AwsLatestServicesTool));

        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Box<dyn McpTool>) {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    /// Get all tool definitions
    pub fn definitions(&self) -> Vec<McpToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Execute a tool by name
    #[instrument(skip(self, args))]
    pub async fn execute(&self, name: &str, args: Value) -> ToolCallResult {
        info!("Executing tool: {}", name);

        let tool = match self.get(name) {
            Some(t) => t,
            None => return ToolCallResult::error(format!("Tool not found: {}", name)),
        };

        let url = match tool.url_argument() {
            Some(arg) => match args.get(arg).and_then(|v| v.as_str()) {
                Some(u) if !u.trim().is_empty() => Some(u.to_string()),
                _ => {
                    return ToolCallResult::error(format!("Missing required parameter: {}", arg))
                }
            },
            None => None,
        };

        match self.service.query(tool.page_kind(), url.as_deref()).await {
            Ok(text) => ToolCallResult::text(text),
            Err(e) => {
                error!("Tool {} failed: {}", name, e);
                ToolCallResult::error(e.to_string())
            }
        }
    }
}

// ============================================================================
// Tool Definitions
// ============================================================================

/// List all AWS services
struct AwsServicesTool;

impl McpTool for AwsServicesTool {
    fn name(&self) -> &str {
        "aws_services"
    }

    fn description(&self) -> &str {
        "Lists all AWS services as a tab-delimited table: service name, the \
         'Service-in-Regions URL', product link and number of regions. Pass a \
         'Service-in-Regions URL' to 'aws_regions_for_service' to see every \
         region that service runs in and when it launched there."
    }

    fn page_kind(&self) -> PageKind {
        PageKind::Services
    }
}

/// Regions a service is available in
struct AwsRegionsForServiceTool;

impl McpTool for AwsRegionsForServiceTool {
    fn name(&self) -> &str {
        "aws_regions_for_service"
    }

    fn description(&self) -> &str {
        "Lists every AWS region a given service is available in, with region \
         code, region name, launch date in that region and product link. Run \
         'aws_services' first and pass the 'Service-in-Regions URL' of the \
         service as service_regions_url."
    }

    fn page_kind(&self) -> PageKind {
        PageKind::RegionsForService
    }

    fn url_argument(&self) -> Option<&str> {
        Some("service_regions_url")
    }
}

/// List all AWS regions
struct AwsRegionsTool;

impl McpTool for AwsRegionsTool {
    fn name(&self) -> &str {
        "aws_regions"
    }

    fn description(&self) -> &str {
        "Lists all AWS regions as a tab-delimited table: region name, region \
         code, the 'Services-in-Region URL', number of unique services and \
         number of Availability Zones. Pass a 'Services-in-Region URL' to \
         'aws_services_in_region' to see every service in that region."
    }

    fn page_kind(&self) -> PageKind {
        PageKind::Regions
    }
}

/// Services available in a region
struct AwsServicesInRegionTool;

impl McpTool for AwsServicesInRegionTool {
    fn name(&self) -> &str {
        "aws_services_in_region"
    }

    fn description(&self) -> &str {
        "Lists every AWS service available in a given region, with launch date \
         in that region and product link. Run 'aws_regions' first and pass the \
         'Services-in-Region URL' of the region as region_services_url."
    }

    fn page_kind(&self) -> PageKind {
        PageKind::ServicesInRegion
    }

    fn url_argument(&self) -> Option<&str> {
        Some("region_services_url")
    }
}

/// List AWS Local Zones
struct AwsLocalZonesTool;

impl McpTool for AwsLocalZonesTool {
    fn name(&self) -> &str {
        "aws_localzones"
    }

    fn description(&self) -> &str {
        "Lists all AWS Local Zones: country and city, Local Zone code, parent \
         region name and parent region code."
    }

    fn page_kind(&self) -> PageKind {
        PageKind::LocalZones
    }
}

/// Recently launched services
struct AwsLatestServicesTool;

impl McpTool for AwsLatestServicesTool {
    fn name(&self) -> &str {
        "aws_latest_services"
    }

    fn description(&self) -> &str {
        "Lists AWS services released in the last 30 days with the region they \
         launched in and the launch date."
    }

    fn page_kind(&self) -> PageKind {
        PageKind::LatestServices
    }
}

/// List of all available tools (for documentation)
pub const AVAILABLE_TOOLS: &[&str] = &[
    "aws_services",
    "aws_regions_for_service",
    "aws_regions",
    "aws_services_in_region",
    "aws_localzones",
    "aws_latest_services",
];
