//! MCP tool handlers for the contacts XML server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.
//! Validation rejections are ordinary tool results flagged as errors; only
//! storage failures and bad requests become protocol errors.

use crate::error::ServiceError;
use crate::models::{ContactField, RawContact};
use crate::observability::MetricsTracker;
use crate::repositories::DocumentStore;
use crate::services::{AddContactOutcome, ContactService, ContactServiceImpl, UploadOutcome};
use crate::validation::{ContactValidator, FieldErrors, Rejection, ValidationResult};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes the contact flows as tools.
#[derive(Clone)]
pub struct ContactsMcpServer {
    contact_service: Arc<dyn ContactService>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for ContactsMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "contacts-xml".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Stores contacts (first name, last name, email, phone) as XML files. Add single contacts, upload XML documents with one or more <contact> elements, list stored files with their validation status, and download them.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct AddContactToolParams {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

impl AddContactToolParams {
    fn into_raw(self) -> RawContact {
        [
            (ContactField::FirstName, self.first_name),
            (ContactField::LastName, self.last_name),
            (ContactField::Email, self.email),
            (ContactField::Phone, self.phone),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct XmlContentParams {
    /// Complete XML document text
    content: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FileNameParams {
    /// Stored file name, e.g. `3f1c...e2.xml`
    file_name: String,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn service_error_to_mcp(e: ServiceError) -> McpError {
    let code = if e.is_not_found() {
        ErrorCode::RESOURCE_NOT_FOUND
    } else if matches!(e, ServiceError::UploadTooLarge { .. }) {
        ErrorCode::INVALID_PARAMS
    } else {
        ErrorCode::INTERNAL_ERROR
    };
    McpError {
        code,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &serde_json::Value, is_error: bool) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    let content = vec![Content::text(text)];
    Ok(if is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    })
}

fn rejection_json(rejection: &Rejection) -> serde_json::Value {
    let mut body = serde_json::json!({
        "valid": false,
        "kind": rejection.kind().as_str(),
        "contact_index": rejection.contact_index(),
        "reason": rejection.to_string(),
    });
    match rejection {
        Rejection::Structure { mismatch, .. } => {
            body["missing"] = serde_json::json!(mismatch.missing);
            body["extra"] = serde_json::json!(mismatch.extra);
            body["duplicated"] = serde_json::json!(mismatch.duplicated);
        }
        Rejection::Fields { errors, .. } => {
            body["field_errors"] = field_errors_json(errors);
        }
        Rejection::Malformed { .. } | Rejection::NoContacts => {}
    }
    body
}

fn field_errors_json(errors: &FieldErrors) -> serde_json::Value {
    errors
        .iter()
        .map(|e| {
            serde_json::json!({
                "field": e.field.tag(),
                "message": e.error.to_string(),
            })
        })
        .collect()
}

// Tool router implementation
#[tool_router]
impl ContactsMcpServer {
    /// Create a new contacts MCP server.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        validator: ContactValidator,
        max_upload_bytes: usize,
        metrics: MetricsTracker,
    ) -> Self {
        let contact_service = Arc::new(ContactServiceImpl::new(
            store,
            validator,
            max_upload_bytes,
            metrics,
        )) as Arc<dyn ContactService>;

        Self {
            contact_service,
            tool_router: Self::tool_router(),
        }
    }

    /// Validate a single contact and save it as a new XML file.
    #[tool(
        description = "Validate a contact and save it as a new XML file. Names are capitalized and the phone is normalized to 8XXXXXXXXXX. Returns the file name, or every invalid field."
    )]
    async fn add_contact(
        &self,
        params: Parameters<AddContactToolParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP Handler: add_contact called");

        let outcome = self
            .contact_service
            .add_contact(params.0.into_raw())
            .await
            .map_err(|e| {
                tracing::error!("Failed to save contact: {:?}", e);
                service_error_to_mcp(e)
            })?;

        match outcome {
            AddContactOutcome::Saved(stored) => json_result(
                &serde_json::json!({
                    "saved": true,
                    "file_name": stored.file_name,
                    "contact": stored.contacts.first(),
                    "stored_at": stored.stored_at,
                }),
                false,
            ),
            AddContactOutcome::Rejected(errors) => json_result(
                &serde_json::json!({
                    "saved": false,
                    "reason": errors.to_string(),
                    "field_errors": field_errors_json(&errors),
                }),
                true,
            ),
        }
    }

    /// Upload an XML document; it is stored only if every contact is valid.
    #[tool(
        description = "Upload an XML document with one or more <contact> elements (each with exactly first_name, last_name, email, phone). The document is stored only if every contact is valid; otherwise the first problem is reported."
    )]
    async fn upload_contacts(
        &self,
        params: Parameters<XmlContentParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: upload_contacts called");
        tracing::debug!("Parameters: content_len={}", params.content.len());

        let outcome = self
            .contact_service
            .upload_document(params.content.into_bytes())
            .await
            .map_err(|e| {
                tracing::error!("Failed to upload document: {:?}", e);
                service_error_to_mcp(e)
            })?;

        match outcome {
            UploadOutcome::Accepted(stored) => json_result(
                &serde_json::json!({
                    "valid": true,
                    "file_name": stored.file_name,
                    "contact_count": stored.contacts.len(),
                    "contacts": stored.contacts,
                    "stored_at": stored.stored_at,
                }),
                false,
            ),
            UploadOutcome::Rejected(rejection) => json_result(&rejection_json(&rejection), true),
        }
    }

    /// Check an XML document without storing it.
    #[tool(
        description = "Validate an XML contacts document without storing it. Returns the normalized contacts or the reason the document is rejected."
    )]
    async fn validate_contacts_xml(
        &self,
        params: Parameters<XmlContentParams>,
    ) -> Result<CallToolResult, McpError> {
        match self
            .contact_service
            .validate_document(params.0.content.as_bytes())
        {
            ValidationResult::Valid(contacts) => json_result(
                &serde_json::json!({
                    "valid": true,
                    "contact_count": contacts.len(),
                    "contacts": contacts,
                }),
                false,
            ),
            ValidationResult::Invalid(rejection) => {
                json_result(&rejection_json(&rejection), true)
            }
        }
    }

    /// List every stored XML file with its contacts or validation error.
    #[tool(
        description = "List every stored XML file, re-validating each one. Valid files show their contacts; invalid files show the validation error."
    )]
    async fn list_contact_files(&self) -> Result<CallToolResult, McpError> {
        let listings = self
            .contact_service
            .list_documents()
            .await
            .map_err(service_error_to_mcp)?;

        json_result(
            &serde_json::json!({
                "file_count": listings.len(),
                "files": listings,
            }),
            false,
        )
    }

    /// Return the stored XML text of one file.
    #[tool(
        description = "Download the XML text of a stored file by its file name. The text is returned unchanged; a file that is not UTF-8 is reported as an error."
    )]
    async fn download_contact_file(
        &self,
        params: Parameters<FileNameParams>,
    ) -> Result<CallToolResult, McpError> {
        let text = self
            .contact_service
            .download_document(&params.0.file_name)
            .await
            .map_err(service_error_to_mcp)?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
