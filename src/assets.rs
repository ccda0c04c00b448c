use crate::core::EffectError;
use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Decoded RGBA8 image, rows top to bottom.
pub struct ImagePixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImagePixels {
    #[inline]
    pub fn natural_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// The two static images every surface samples. Loaded once, never mutated.
pub struct SharedAssets {
    pub gradient: ImagePixels,
    pub noise: ImagePixels,
}

impl SharedAssets {
    pub async fn load(gradient_url: &str, noise_url: &str) -> anyhow::Result<Self> {
        let gradient = load_image(gradient_url).await?;
        let noise = load_image(noise_url).await?;
        Ok(Self { gradient, noise })
    }
}

async fn load_image(url: &str) -> anyhow::Result<ImagePixels> {
    let asset_err = |reason: String| EffectError::Asset {
        url: url.to_string(),
        reason,
    };
    let document = crate::dom::window_document()?;

    let img = web::HtmlImageElement::new().map_err(|e| asset_err(format!("{:?}", e)))?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(url);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| asset_err(format!("decode: {:?}", e)))?;

    let width = img.natural_width();
    let height = img.natural_height();
    if width == 0 || height == 0 {
        return Err(asset_err("image has no pixels".to_string()).into());
    }

    // Read pixels back through a scratch 2D canvas.
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| asset_err(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|e| asset_err(format!("{:?}", e)))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| asset_err(format!("{:?}", e)))?
        .ok_or_else(|| asset_err("no 2d context".to_string()))?
        .dyn_into()
        .map_err(|e| asset_err(format!("{:?}", e)))?;
    ctx.draw_image_with_html_image_element(&img, 0.0, 0.0)
        .map_err(|e| asset_err(format!("{:?}", e)))?;
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(|e| asset_err(format!("{:?}", e)))?;

    log::info!("[assets] loaded {} ({}x{})", url, width, height);
    Ok(ImagePixels {
        width,
        height,
        rgba: data.data().0,
    })
}
