//! MCP tool surface: a single `getWeather` tool.

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, warn};
use weather_core::{DATE_PATTERN, WeatherLookup, WeatherQuery};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetWeatherRequest {
    /// The location to get weather data for (city name)
    pub location: String,
    #[serde(default)]
    #[schemars(schema_with = "calendar_date_schema")]
    pub date: Option<String>,
}

fn calendar_date_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": "string",
        "pattern": DATE_PATTERN,
        "description": "Optional date in YYYY-MM-DD format. Omit for current conditions."
    })
}

impl From<GetWeatherRequest> for WeatherQuery {
    fn from(request: GetWeatherRequest) -> Self {
        Self { location: request.location, date: request.date }
    }
}

#[derive(Clone)]
pub struct WeatherServer {
    lookup: WeatherLookup,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WeatherServer {
    pub fn new(lookup: WeatherLookup) -> Self {
        Self { lookup, tool_router: Self::tool_router() }
    }

    #[tool(
        name = "getWeather",
        description = "Get weather for a location. Without a date returns current conditions; with a YYYY-MM-DD date returns that day's daily summary. Result is JSON with temperature, humidity, description and windSpeed, or a plain-text explanation when the lookup fails."
    )]
    async fn get_weather(
        &self,
        Parameters(request): Parameters<GetWeatherRequest>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let query = WeatherQuery::from(request);

        if let Err(e) = query.validate() {
            warn!(error = %e, "rejecting getWeather call");
            return Err(rmcp::ErrorData::invalid_params(e.to_string(), None));
        }

        info!(location = %query.location, date = ?query.date, "getWeather");
        let text = self.lookup.respond(&query).await;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_owned(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                ..Default::default()
            },
            instructions: Some(
                "Weather lookups by place name. Call getWeather with a city name, and \
                 optionally a YYYY-MM-DD date for a daily summary."
                    .into(),
            ),
        }
    }
}
