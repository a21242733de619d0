//! Optional artwork
//!
//! Every image is optional: a failed load leaves a hole that the renderer
//! fills with placeholder art. Loading never fails as a whole.

use crate::sim::entity::{DeviceArt, EntityKind, KID_PORTRAITS, PARENT_PORTRAITS};

/// Kid portrait files, in portrait-index order
pub const KID_FILES: [&str; KID_PORTRAITS] = [
    "assets/juju.png",
    "assets/suz.png",
    "assets/leo.png",
    "assets/paul.png",
    "assets/raph.png",
];

/// Parent portrait files, in portrait-index order
pub const PARENT_FILES: [&str; PARENT_PORTRAITS] = ["assets/fred.png", "assets/steph.png"];

/// Device artwork path
pub fn device_file(device: DeviceArt) -> &'static str {
    match device {
        DeviceArt::Phone => "assets/phone.png",
        DeviceArt::Tablet => "assets/iPad.png",
        DeviceArt::Tv => "assets/tv.png",
        DeviceArt::PhoneChecked => "assets/phonex.png",
        DeviceArt::TabletChecked => "assets/ipadx.png",
    }
}

/// Decoded images keyed by logical name, any of which may be missing
#[derive(Debug, Clone)]
pub struct AssetSet<I> {
    pub kids: [Option<I>; KID_PORTRAITS],
    pub parents: [Option<I>; PARENT_PORTRAITS],
    pub devices: [Option<I>; 5],
}

impl<I> Default for AssetSet<I> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<I> AssetSet<I> {
    /// No images at all (everything drawn as placeholders)
    pub fn empty() -> Self {
        Self {
            kids: std::array::from_fn(|_| None),
            parents: std::array::from_fn(|_| None),
            devices: std::array::from_fn(|_| None),
        }
    }

    pub fn portrait(&self, kind: EntityKind, index: usize) -> Option<&I> {
        match kind {
            EntityKind::Kid => self.kids.get(index)?.as_ref(),
            EntityKind::Parent => self.parents.get(index)?.as_ref(),
        }
    }

    pub fn device(&self, device: DeviceArt) -> Option<&I> {
        self.devices.get(device.index())?.as_ref()
    }

    /// (loaded, total)
    pub fn loaded_count(&self) -> (usize, usize) {
        let all = self.kids.iter().chain(&self.parents).chain(&self.devices);
        let total = KID_PORTRAITS + PARENT_PORTRAITS + self.devices.len();
        (all.filter(|i| i.is_some()).count(), total)
    }
}

/// Browser image loading
#[cfg(target_arch = "wasm32")]
pub mod web {
    use js_sys::Promise;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlImageElement;

    use super::{AssetSet, KID_FILES, PARENT_FILES, device_file};
    use crate::sim::entity::DeviceArt;

    /// Start loading `src`; the promise resolves to the image or `null`, never rejects
    fn try_image(src: &str) -> Promise {
        let src = src.to_owned();
        Promise::new(&mut move |resolve, _reject| {
            let Ok(img) = HtmlImageElement::new() else {
                resolve.call1(&JsValue::NULL, &JsValue::NULL).ok();
                return;
            };
            let loaded = {
                let resolve = resolve.clone();
                let img = img.clone();
                Closure::once_into_js(move || {
                    resolve.call1(&JsValue::NULL, &img).ok();
                })
            };
            let failed = {
                let src = src.clone();
                Closure::once_into_js(move || {
                    log::warn!("Missing asset {src}, using placeholder");
                    resolve.call1(&JsValue::NULL, &JsValue::NULL).ok();
                })
            };
            img.set_onload(Some(loaded.unchecked_ref()));
            img.set_onerror(Some(failed.unchecked_ref()));
            img.set_src(&src);
        })
    }

    async fn settle(promise: Promise) -> Option<HtmlImageElement> {
        JsFuture::from(promise)
            .await
            .ok()
            .and_then(|v| v.dyn_into::<HtmlImageElement>().ok())
    }

    /// Load every asset, in parallel, and wait for all of them to settle
    pub async fn load() -> AssetSet<HtmlImageElement> {
        // Kick off every request before awaiting any of them
        let kids: Vec<Promise> = KID_FILES.iter().map(|f| try_image(f)).collect();
        let parents: Vec<Promise> = PARENT_FILES.iter().map(|f| try_image(f)).collect();
        let devices: Vec<Promise> = DeviceArt::ALL
            .iter()
            .map(|d| try_image(device_file(*d)))
            .collect();

        let mut set = AssetSet::empty();
        for (slot, p) in set.kids.iter_mut().zip(kids) {
            *slot = settle(p).await;
        }
        for (slot, p) in set.parents.iter_mut().zip(parents) {
            *slot = settle(p).await;
        }
        for (slot, p) in set.devices.iter_mut().zip(devices) {
            *slot = settle(p).await;
        }

        let (loaded, total) = set.loaded_count();
        log::info!("Assets ready: {loaded}/{total} images loaded");
        set
    }
}
