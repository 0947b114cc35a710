//! HTTP client for the block endpoints (REST + multipart).

use crate::error::TransportError;
use crate::media::{MediaCategory, StagedPart};
use crate::sync::{BlockTransport, CreateSubmission, MediaDelta};
use async_trait::async_trait;
use gloo::console;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use vitrina_api_models::{
    ApiMessage, BlockDetail, BlockId, BlockNode, ErrorBody, MetadataUpdate, NewBlock,
};
use web_sys::FormData;

/// Client for the block API, rooted at `base_url`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Client against `base_url`; a trailing slash is tolerated.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let response = Request::get(&self.url(path))
            .send()
            .await
            .map_err(wire_error)?;
        parse_json(response).await
    }

    /// Load a block for an edit session.
    ///
    /// # Errors
    /// [`TransportError`] on wire failures or non-success responses.
    pub async fn fetch_block(&self, block_id: BlockId) -> Result<BlockDetail, TransportError> {
        self.get_json(&format!("/blocks/id/{block_id}")).await
    }

    /// Fetch the full block hierarchy for the tree glue.
    ///
    /// # Errors
    /// [`TransportError`] on wire failures or non-success responses.
    pub async fn list_blocks(&self) -> Result<Vec<BlockNode>, TransportError> {
        self.get_json("/blocks").await
    }

    /// Create a hierarchy node without media.
    ///
    /// # Errors
    /// [`TransportError`] on wire failures or non-success responses.
    pub async fn create_child(&self, block: &NewBlock) -> Result<ApiMessage, TransportError> {
        let response = Request::post(&self.url("/blocks"))
            .json(block)
            .map_err(wire_error)?
            .send()
            .await
            .map_err(wire_error)?;
        parse_json(response).await
    }

    /// Delete a block and its subtree.
    ///
    /// # Errors
    /// [`TransportError`] on wire failures or non-success responses.
    pub async fn delete_block(&self, block_id: BlockId) -> Result<ApiMessage, TransportError> {
        let response = Request::delete(&self.url(&format!("/blocks/id/{block_id}")))
            .send()
            .await
            .map_err(wire_error)?;
        parse_json(response).await
    }

    /// Send the assembled form as a broadcast to one recipient.
    ///
    /// # Errors
    /// [`TransportError`] on wire failures or non-success responses.
    pub async fn send_broadcast(
        &self,
        submission: &CreateSubmission,
        user_id: &str,
    ) -> Result<(), TransportError> {
        let form = create_form(submission)?;
        let _ = form.append_with_str("user_id", user_id);
        let response = Request::post(&self.url("/send"))
            .body(form)
            .send()
            .await
            .map_err(wire_error)?;
        expect_success(response).await
    }
}

#[async_trait(?Send)]
impl BlockTransport for ApiClient {
    async fn create_block(&self, submission: &CreateSubmission) -> Result<(), TransportError> {
        let form = create_form(submission)?;
        let response = Request::post(&self.url("/blocks/new"))
            .body(form)
            .send()
            .await
            .map_err(wire_error)?;
        expect_success(response).await
    }

    async fn update_metadata(
        &self,
        block_id: BlockId,
        payload: &MetadataUpdate,
    ) -> Result<(), TransportError> {
        let response = Request::patch(&self.url(&format!("/blocks/id/{block_id}")))
            .json(payload)
            .map_err(wire_error)?
            .send()
            .await
            .map_err(wire_error)?;
        expect_success(response).await
    }

    async fn update_media(
        &self,
        block_id: BlockId,
        delta: &MediaDelta,
    ) -> Result<(), TransportError> {
        let form = delta_form(delta)?;
        let response = Request::post(&self.url(&format!("/blocks/id/{block_id}/media")))
            .body(form)
            .send()
            .await
            .map_err(wire_error)?;
        expect_success(response).await
    }
}

fn wire_error(err: gloo_net::Error) -> TransportError {
    TransportError::Request {
        detail: err.to_string(),
    }
}

async fn check_status(response: Response) -> Result<Response, TransportError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .map(|body| body.detail);
    console::error!("block api request failed", status);
    Err(TransportError::Status { status, detail })
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let response = check_status(response).await?;
    response.json::<T>().await.map_err(wire_error)
}

async fn expect_success(response: Response) -> Result<(), TransportError> {
    check_status(response).await.map(|_| ())
}

fn new_form() -> Result<FormData, TransportError> {
    FormData::new().map_err(|err| TransportError::Request {
        detail: format!("form-data: {err:?}"),
    })
}

fn create_form(submission: &CreateSubmission) -> Result<FormData, TransportError> {
    let form = new_form()?;
    append_language_fields(&form, &submission.metadata);
    for uploads in &submission.uploads {
        append_parts(&form, uploads.category, &uploads.parts)?;
    }
    Ok(form)
}

fn delta_form(delta: &MediaDelta) -> Result<FormData, TransportError> {
    let form = new_form()?;
    for category_delta in &delta.categories {
        for filename in &category_delta.removed {
            let _ = form.append_with_str(category_delta.category.removal_field(), filename);
        }
        append_parts(&form, category_delta.category, &category_delta.added)?;
    }
    Ok(form)
}

fn append_language_fields(form: &FormData, metadata: &MetadataUpdate) {
    for (language, text) in metadata.title.entries() {
        let _ = form.append_with_str(&format!("title_{language}"), text);
    }
    for (language, text) in metadata.content.entries() {
        let _ = form.append_with_str(&format!("content_{language}"), text);
    }
}

fn append_parts(
    form: &FormData,
    category: MediaCategory,
    parts: &[StagedPart],
) -> Result<(), TransportError> {
    for part in parts {
        form.append_with_blob_and_filename(category.upload_field(), &part.file, &part.name)
            .map_err(|err| TransportError::Request {
                detail: format!("attach {}: {err:?}", part.name),
            })?;
    }
    Ok(())
}
