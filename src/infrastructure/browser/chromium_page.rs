use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use tokio::time::Instant;
use uuid::Uuid;

use crate::application::ports::{BrowserError, BrowserPage, ElementHandle};

/// Marker attribute stamped onto located elements so later operations can
/// re-address them across frame documents.
const MARK_ATTR: &str = "data-anchorage-id";

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// [`BrowserPage`] adapter over a chromiumoxide page.
///
/// All queries run as injected JS rather than CDP DOM commands:
/// chromiumoxide offers no stable cross-frame element search, and the
/// challenge frames are same-origin with the page (the browser is launched
/// with site isolation disabled), so a recursive `contentDocument` walk can
/// pierce them. Bounded waits are poll loops over that walk.
#[derive(Clone)]
pub struct ChromiumPage {
    page: Arc<Page>,
    /// When set, searches are scoped to the first frame whose title
    /// contains this string instead of the top document.
    frame_title: Option<String>,
}

impl ChromiumPage {
    pub fn new(page: Arc<Page>) -> Self {
        Self {
            page,
            frame_title: None,
        }
    }

    fn scoped(&self, frame_title: String) -> Self {
        Self {
            page: Arc::clone(&self.page),
            frame_title: Some(frame_title),
        }
    }

    async fn eval<T: serde::de::DeserializeOwned>(&self, expr: String) -> Result<T, BrowserError> {
        let result = self
            .page
            .evaluate(expr)
            .await
            .map_err(|e| BrowserError::Protocol(e.to_string()))?;
        result
            .into_value::<T>()
            .map_err(|e| BrowserError::EvaluationFailed(e.to_string()))
    }

    /// JS prelude binding `rootDoc` to this handle's scope (top document or
    /// the titled frame's document) and `collectDocs` for frame piercing.
    fn js_prelude(&self) -> String {
        format!(
            r#"
            const MARK = {mark};
            const collectDocs = (root) => {{
                const docs = [];
                const stack = [root];
                while (stack.length) {{
                    const doc = stack.pop();
                    if (!doc) continue;
                    docs.push(doc);
                    for (const frame of doc.querySelectorAll('iframe')) {{
                        try {{ if (frame.contentDocument) stack.push(frame.contentDocument); }} catch (e) {{}}
                    }}
                }}
                return docs;
            }};
            const frameDoc = (title) => {{
                for (const doc of collectDocs(document)) {{
                    for (const frame of doc.querySelectorAll('iframe')) {{
                        try {{
                            if ((frame.getAttribute('title') || '').includes(title) && frame.contentDocument) {{
                                return frame.contentDocument;
                            }}
                        }} catch (e) {{}}
                    }}
                }}
                return null;
            }};
            const rootDoc = {root};
            "#,
            mark = js_str(MARK_ATTR),
            root = match &self.frame_title {
                Some(title) => format!("frameDoc({})", js_str(title)),
                None => "document".to_string(),
            },
        )
    }

    /// Stamps the first `selector` match in scope with a fresh mark and
    /// returns whether anything matched.
    async fn try_mark_first(&self, selector: &str, mark: &str) -> Result<bool, BrowserError> {
        let expr = format!(
            r#"(() => {{
                {prelude}
                if (!rootDoc) return false;
                const el = rootDoc.querySelector({selector});
                if (!el) return false;
                el.setAttribute(MARK, {mark});
                return true;
            }})()"#,
            prelude = self.js_prelude(),
            selector = js_str(selector),
            mark = js_str(mark),
        );
        self.eval(expr).await
    }

    async fn try_mark_all(
        &self,
        selector: &str,
        include_frames: bool,
    ) -> Result<Vec<String>, BrowserError> {
        let expr = format!(
            r#"(() => {{
                {prelude}
                if (!rootDoc) return [];
                const docs = {pierce} ? collectDocs(rootDoc) : [rootDoc];
                const marks = [];
                for (const doc of docs) {{
                    for (const el of doc.querySelectorAll({selector})) {{
                        let mark = el.getAttribute(MARK);
                        if (!mark) {{
                            mark = {prefix} + '-' + marks.length + '-' + Date.now();
                            el.setAttribute(MARK, mark);
                        }}
                        marks.push(mark);
                    }}
                }}
                return marks;
            }})()"#,
            prelude = self.js_prelude(),
            pierce = include_frames,
            selector = js_str(selector),
            prefix = js_str(&Uuid::new_v4().to_string()),
        );
        self.eval(expr).await
    }

    async fn try_mark_text(&self, text: &str, mark: &str) -> Result<bool, BrowserError> {
        let expr = format!(
            r#"(() => {{
                {prelude}
                if (!rootDoc) return false;
                const needle = {text};
                for (const doc of collectDocs(rootDoc)) {{
                    if (!doc.body) continue;
                    const walker = doc.createTreeWalker(doc.body, NodeFilter.SHOW_ELEMENT);
                    let node = doc.body;
                    while (node) {{
                        if ((node.innerText || '').includes(needle)) {{
                            let inner = node;
                            // Descend to the tightest element containing the text.
                            let descended = true;
                            while (descended) {{
                                descended = false;
                                for (const child of inner.children) {{
                                    if ((child.innerText || '').includes(needle)) {{
                                        inner = child;
                                        descended = true;
                                        break;
                                    }}
                                }}
                            }}
                            inner.setAttribute(MARK, {mark});
                            return true;
                        }}
                        node = walker.nextNode();
                    }}
                }}
                return false;
            }})()"#,
            prelude = self.js_prelude(),
            text = js_str(text),
            mark = js_str(mark),
        );
        self.eval(expr).await
    }

    async fn frame_exists(&self, title_contains: &str) -> Result<bool, BrowserError> {
        let expr = format!(
            r#"(() => {{
                {prelude}
                return frameDoc({title}) !== null;
            }})()"#,
            prelude = self.js_prelude(),
            title = js_str(title_contains),
        );
        self.eval(expr).await
    }

    fn element(&self, mark: String) -> Box<dyn ElementHandle> {
        Box::new(ChromiumElement {
            page: Arc::clone(&self.page),
            mark,
        })
    }
}

#[async_trait]
impl BrowserPage for ChromiumPage {
    async fn select(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Box<dyn ElementHandle>, BrowserError> {
        let mark = Uuid::new_v4().to_string();
        let deadline = Instant::now() + timeout;
        loop {
            if self.try_mark_first(selector, &mark).await? {
                return Ok(self.element(mark));
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::NotFound(selector.to_string()));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn select_all(
        &self,
        selector: &str,
        timeout: Duration,
        include_frames: bool,
    ) -> Result<Vec<Box<dyn ElementHandle>>, BrowserError> {
        let deadline = Instant::now() + timeout;
        loop {
            let marks = self.try_mark_all(selector, include_frames).await?;
            if !marks.is_empty() {
                return Ok(marks.into_iter().map(|m| self.element(m)).collect());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::NotFound(selector.to_string()));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn find_text(
        &self,
        text: &str,
        timeout: Duration,
    ) -> Result<Option<Box<dyn ElementHandle>>, BrowserError> {
        let mark = Uuid::new_v4().to_string();
        let deadline = Instant::now() + timeout;
        loop {
            if self.try_mark_text(text, &mark).await? {
                return Ok(Some(self.element(mark)));
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn frame_by_title(
        &self,
        title_contains: &str,
        timeout: Duration,
    ) -> Result<Box<dyn BrowserPage>, BrowserError> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.frame_exists(title_contains).await? {
                return Ok(Box::new(self.scoped(title_contains.to_string())));
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::NotFound(format!(
                    "frame with title containing '{title_contains}'"
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

struct ChromiumElement {
    page: Arc<Page>,
    mark: String,
}

impl ChromiumElement {
    async fn eval<T: serde::de::DeserializeOwned>(&self, body: &str) -> Result<T, BrowserError> {
        // Marked elements are re-resolved across every frame document, so a
        // handle stays valid regardless of which frame it came from.
        let expr = format!(
            r#"(() => {{
                const findMarked = (mark) => {{
                    const stack = [document];
                    while (stack.length) {{
                        const doc = stack.pop();
                        if (!doc) continue;
                        const el = doc.querySelector('[{attr}="' + mark + '"]');
                        if (el) return el;
                        for (const frame of doc.querySelectorAll('iframe')) {{
                            try {{ if (frame.contentDocument) stack.push(frame.contentDocument); }} catch (e) {{}}
                        }}
                    }}
                    return null;
                }};
                const el = findMarked({mark});
                if (!el) return {{ ok: false, value: null }};
                {body}
            }})()"#,
            attr = MARK_ATTR,
            mark = js_str(&self.mark),
            body = body,
        );
        let result = self
            .page
            .evaluate(expr)
            .await
            .map_err(|e| BrowserError::Protocol(e.to_string()))?;
        let outcome: EvalOutcome<T> = result
            .into_value()
            .map_err(|e| BrowserError::EvaluationFailed(e.to_string()))?;
        if !outcome.ok {
            return Err(BrowserError::NotFound(format!(
                "marked element {} no longer present",
                self.mark
            )));
        }
        outcome
            .value
            .ok_or_else(|| BrowserError::EvaluationFailed("missing result value".to_string()))
    }
}

#[derive(serde::Deserialize)]
struct EvalOutcome<T> {
    ok: bool,
    value: Option<T>,
}

#[async_trait]
impl ElementHandle for ChromiumElement {
    async fn click(&self) -> Result<(), BrowserError> {
        let _: bool = self
            .eval("el.click(); return { ok: true, value: true };")
            .await?;
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<(), BrowserError> {
        let body = format!(
            r#"el.focus();
               el.value = {text};
               el.dispatchEvent(new Event('input', {{ bubbles: true }}));
               el.dispatchEvent(new Event('change', {{ bubbles: true }}));
               return {{ ok: true, value: true }};"#,
            text = js_str(text),
        );
        let _: bool = self.eval(&body).await?;
        Ok(())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, BrowserError> {
        let body = format!(
            "return {{ ok: true, value: {{ attr: el.getAttribute({name}) }} }};",
            name = js_str(name),
        );
        let wrapped: AttrValue = self.eval(&body).await?;
        Ok(wrapped.attr)
    }
}

#[derive(serde::Deserialize)]
struct AttrValue {
    attr: Option<String>,
}

/// Escapes a Rust string as a JS string literal (JSON is a JS subset).
fn js_str(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
