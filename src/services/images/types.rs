use crate::errors::{FoundryError, ValidationError};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output dimensions, sent on the wire as `"{width}x{height}"` or `"auto"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    /// 1024x1024
    #[default]
    Square,
    /// 1536x1024
    Landscape,
    /// 1024x1536
    Portrait,
    Auto,
    Custom { width: u32, height: u32 },
}

impl ImageSize {
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            ImageSize::Square => Some((1024, 1024)),
            ImageSize::Landscape => Some((1536, 1024)),
            ImageSize::Portrait => Some((1024, 1536)),
            ImageSize::Auto => None,
            ImageSize::Custom { width, height } => Some((*width, *height)),
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dimensions() {
            Some((width, height)) => write!(f, "{width}x{height}"),
            None => f.write_str("auto"),
        }
    }
}

impl FromStr for ImageSize {
    type Err = FoundryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(ImageSize::Auto);
        }
        let invalid = || {
            FoundryError::Validation(ValidationError::InvalidParameter {
                parameter: "size".to_string(),
                reason: format!("expected WIDTHxHEIGHT or auto, got '{s}'"),
            })
        };
        let (width, height) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: u32 = width.trim().parse().map_err(|_| invalid())?;
        let height: u32 = height.trim().parse().map_err(|_| invalid())?;
        Ok(match (width, height) {
            (1024, 1024) => ImageSize::Square,
            (1536, 1024) => ImageSize::Landscape,
            (1024, 1536) => ImageSize::Portrait,
            (width, height) => ImageSize::Custom { width, height },
        })
    }
}

impl Serialize for ImageSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Low,
    Medium,
    High,
    #[default]
    Auto,
}

impl ImageQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageQuality::Low => "low",
            ImageQuality::Medium => "medium",
            ImageQuality::High => "high",
            ImageQuality::Auto => "auto",
        }
    }
}

/// Model family behind the image deployment; selects route and payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageModel {
    #[default]
    GptImage,
    Flux2Pro,
}

impl ImageModel {
    pub fn model_id(&self) -> &'static str {
        match self {
            ImageModel::GptImage => "gpt-image-1",
            ImageModel::Flux2Pro => "flux.2-pro",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub size: ImageSize,
    pub quality: ImageQuality,
    pub n: u32,
    #[serde(skip)]
    pub output_file: Option<PathBuf>,
}

impl ImageGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            size: ImageSize::Square,
            quality: ImageQuality::Auto,
            n: 1,
            output_file: None,
        }
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_quality(mut self, quality: ImageQuality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_n(mut self, n: u32) -> Self {
        self.n = n;
        self
    }

    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }
}

/// Edit of an existing image, optionally masked and with extra reference images.
#[derive(Debug, Clone)]
pub struct ImageEditRequest {
    pub image_path: PathBuf,
    pub prompt: String,
    pub mask_path: Option<PathBuf>,
    pub additional_image_paths: Vec<PathBuf>,
    pub size: ImageSize,
    pub quality: ImageQuality,
    pub output_file: Option<PathBuf>,
}

impl ImageEditRequest {
    pub fn new(image_path: impl Into<PathBuf>, prompt: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            prompt: prompt.into(),
            mask_path: None,
            additional_image_paths: Vec::new(),
            size: ImageSize::Auto,
            quality: ImageQuality::Auto,
            output_file: None,
        }
    }

    pub fn with_mask(mut self, mask_path: impl Into<PathBuf>) -> Self {
        self.mask_path = Some(mask_path.into());
        self
    }

    pub fn with_additional_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.additional_image_paths.push(path.into());
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_quality(mut self, quality: ImageQuality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Input files in upload order, each with the role reported if it is missing.
    pub fn input_files(&self) -> Vec<(&'static str, &Path)> {
        let mut files = vec![("image", self.image_path.as_path())];
        if let Some(mask) = &self.mask_path {
            files.push(("mask", mask.as_path()));
        }
        files.extend(
            self.additional_image_paths
                .iter()
                .map(|p| ("additional image", p.as_path())),
        );
        files
    }
}
