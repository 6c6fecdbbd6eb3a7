//! Bindings for the browser objects most programs start from.
//!
//! Start from the host's global object:
//!
//! ```ignore
//! let mut global = Global::default();
//! bind(&mut global, handle)?;
//! if let Some(document) = global.window.call()?.and_then(|w| w.document.call().ok().flatten()) {
//!   let p = document.create_element.call("p".to_string())?;
//! }
//! ```

bindable! {
  /// The global object (`globalThis`).
  pub struct Global<H> {
    pub value: HostHandle,
    pub window: fn() -> Option<Window<H>> = "window",
  }
}

bindable! {
  pub struct Window<H> {
    pub value: HostHandle,
    pub document: fn() -> Option<Document<H>> = "document",
    pub location: fn() -> Option<Location<H>> = "location",
    pub inner_width: fn() -> f64 = "innerWidth",
    pub inner_height: fn() -> f64 = "innerHeight",
    pub alert: fn(String) = "alert()",
  }
}

bindable! {
  pub struct Location<H> {
    pub value: HostHandle,
    pub href: fn() -> String = "href",
    pub set_href: fn(String) = "href",
    pub host: fn() -> String = "host",
    pub pathname: fn() -> String = "pathname",
    pub reload: fn() = "reload()",
  }
}

bindable! {
  pub struct Document<H> {
    pub value: HostHandle,
    pub body: fn() -> Option<HtmlElement<H>> = "body",
    pub title: fn() -> String = "title",
    pub set_title: fn(String) = "title",
    pub create_element: fn(String) -> Option<HtmlElement<H>> = "createElement()",
    pub get_element_by_id: fn(String) -> Option<HtmlElement<H>> = "getElementById()",
  }
}

bindable! {
  pub struct HtmlElement<H> {
    pub value: HostHandle,
    pub tag_name: fn() -> String = "tagName",
    pub id: fn() -> String = "id",
    pub inner_html: fn() -> String = "innerHTML",
    pub set_inner_html: fn(String) = "innerHTML",
    pub child_element_count: fn() -> i64 = "childElementCount",
    pub append_child: fn(HtmlElement<H>) = "appendChild()",
    pub remove_child: fn(HtmlElement<H>) = "removeChild()",
    pub set_attribute: fn(String, String) = "setAttribute()",
  }
}
