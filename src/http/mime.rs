//! Mime types that tez needs to name: the render step and static file serving.

use std::fmt::Display;

/// Represents a mime type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MimeType {
  /// `text/plain`
  TextPlain,
  /// `text/html`
  TextHtml,
  /// `text/css`
  TextCss,
  /// `text/javascript`
  TextJavaScript,
  /// `text/csv`
  TextCsv,
  /// `application/json`
  ApplicationJson,
  /// `application/xml`
  ApplicationXml,
  /// `application/pdf`
  ApplicationPdf,
  /// `application/zip`
  ApplicationZip,
  /// `application/wasm`
  ApplicationWasm,
  /// `application/octet-stream`
  ApplicationOctetStream,
  /// `image/bmp`
  ImageBmp,
  /// `image/gif`
  ImageGif,
  /// `image/jpeg`
  ImageJpeg,
  /// `image/png`
  ImagePng,
  /// `image/webp`
  ImageWebp,
  /// `image/svg+xml`
  ImageSvg,
  /// `image/vnd.microsoft.icon`
  ImageIcon,
  /// `font/ttf`
  FontTtf,
  /// `font/otf`
  FontOtf,
  /// `font/woff`
  FontWoff,
  /// `font/woff2`
  FontWoff2,
  /// `video/mp4`
  VideoMp4,
  /// `video/webm`
  VideoWebm,
  /// Anything else.
  Other(String),
}

impl MimeType {
  /// Guesses the mime type of a file from its extension.
  /// Unknown extensions map to `application/octet-stream`.
  pub fn from_extension(extension: impl AsRef<str>) -> Self {
    match extension.as_ref().to_ascii_lowercase().as_str() {
      "txt" => MimeType::TextPlain,
      "html" => MimeType::TextHtml,
      "htm" => MimeType::TextHtml,
      "css" => MimeType::TextCss,
      "js" => MimeType::TextJavaScript,
      "mjs" => MimeType::TextJavaScript,
      "csv" => MimeType::TextCsv,
      "json" => MimeType::ApplicationJson,
      "xml" => MimeType::ApplicationXml,
      "pdf" => MimeType::ApplicationPdf,
      "zip" => MimeType::ApplicationZip,
      "wasm" => MimeType::ApplicationWasm,
      "bmp" => MimeType::ImageBmp,
      "gif" => MimeType::ImageGif,
      "jpeg" => MimeType::ImageJpeg,
      "jpg" => MimeType::ImageJpeg,
      "png" => MimeType::ImagePng,
      "webp" => MimeType::ImageWebp,
      "svg" => MimeType::ImageSvg,
      "ico" => MimeType::ImageIcon,
      "ttf" => MimeType::FontTtf,
      "otf" => MimeType::FontOtf,
      "woff" => MimeType::FontWoff,
      "woff2" => MimeType::FontWoff2,
      "mp4" => MimeType::VideoMp4,
      "webm" => MimeType::VideoWebm,
      _ => MimeType::ApplicationOctetStream,
    }
  }

  /// The textual representation used in the Content-Type header.
  pub fn as_str(&self) -> &str {
    match self {
      MimeType::TextPlain => "text/plain",
      MimeType::TextHtml => "text/html",
      MimeType::TextCss => "text/css",
      MimeType::TextJavaScript => "text/javascript",
      MimeType::TextCsv => "text/csv",
      MimeType::ApplicationJson => "application/json",
      MimeType::ApplicationXml => "application/xml",
      MimeType::ApplicationPdf => "application/pdf",
      MimeType::ApplicationZip => "application/zip",
      MimeType::ApplicationWasm => "application/wasm",
      MimeType::ApplicationOctetStream => "application/octet-stream",
      MimeType::ImageBmp => "image/bmp",
      MimeType::ImageGif => "image/gif",
      MimeType::ImageJpeg => "image/jpeg",
      MimeType::ImagePng => "image/png",
      MimeType::ImageWebp => "image/webp",
      MimeType::ImageSvg => "image/svg+xml",
      MimeType::ImageIcon => "image/vnd.microsoft.icon",
      MimeType::FontTtf => "font/ttf",
      MimeType::FontOtf => "font/otf",
      MimeType::FontWoff => "font/woff",
      MimeType::FontWoff2 => "font/woff2",
      MimeType::VideoMp4 => "video/mp4",
      MimeType::VideoWebm => "video/webm",
      MimeType::Other(other) => other.as_str(),
    }
  }
}

impl From<&str> for MimeType {
  fn from(value: &str) -> Self {
    MimeType::Other(value.to_string())
  }
}

impl Display for MimeType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
