//! Image operation handlers.
//!
//! Each handler reads the multipart upload once, parses its scalar fields
//! and hands the buffer to the matching `pf_av` operation. The response body
//! is the encoded image with its MIME type as `Content-Type`.

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use utoipa::ToSchema;

use pf_av::Transformed;
use pf_core::Dimensions;

use crate::context::AppContext;
use crate::error::{AppError, ErrorBody};
use crate::upload::UploadForm;

/// Multipart body of `POST /convert_png_to_jpeg`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ConvertForm {
    /// PNG image.
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Multipart body of `POST /resize_image`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ResizeForm {
    /// JPEG, PNG, WebP or BMP image.
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    /// Target width in pixels, 1 to 4096.
    width: u16,
    /// Target height in pixels, 1 to 4096.
    height: u16,
}

/// Multipart body of `POST /compress_image`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CompressForm {
    /// JPEG, PNG or WebP image.
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    /// 1 (lightest) to 5 (strongest).
    compression_level: u8,
}

fn image_response(out: Transformed) -> impl IntoResponse {
    ([(CONTENT_TYPE, out.content_type())], out.data)
}

/// POST /convert_png_to_jpeg
#[utoipa::path(
    post,
    path = "/convert_png_to_jpeg",
    request_body(content = ConvertForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "JPEG image"),
        (status = 400, description = "Invalid upload or conversion failure", body = ErrorBody)
    )
)]
pub async fn convert_png_to_jpeg(
    State(ctx): State<AppContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::read(multipart).await?;
    let file = form.file()?;

    let out = pf_av::convert_png_to_jpeg(ctx.tool.as_ref(), file).await?;
    Ok(image_response(out))
}

/// POST /resize_image
#[utoipa::path(
    post,
    path = "/resize_image",
    request_body(content = ResizeForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Resized image in the input's format"),
        (status = 400, description = "Invalid upload, dimensions or format", body = ErrorBody)
    )
)]
pub async fn resize_image(
    State(ctx): State<AppContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::read(multipart).await?;
    let file = form.file()?;
    let width: u16 = form.field("width")?;
    let height: u16 = form.field("height")?;

    let target = Dimensions::new(width.into(), height.into());
    let out = pf_av::resize(ctx.tool.as_ref(), file, target).await?;
    Ok(image_response(out))
}

/// POST /compress_image
#[utoipa::path(
    post,
    path = "/compress_image",
    request_body(content = CompressForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Compressed image in the input's format"),
        (status = 400, description = "Invalid upload, level or format", body = ErrorBody)
    )
)]
pub async fn compress_image(
    State(ctx): State<AppContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::read(multipart).await?;
    let file = form.file()?;
    let level: u8 = form.field("compression_level")?;

    let out = pf_av::compress(ctx.tool.as_ref(), file, level).await?;
    Ok(image_response(out))
}
