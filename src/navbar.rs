//! Cosmetic navbar behaviour: compact header on scroll, enhanced titles,
//! smooth in-page scrolling, mobile menu auto-collapse and the active link.

use async_trait::async_trait;

use crate::dom::{Document, ElementId};
use crate::page::{Dispatch, Effect, Event, Handler};
use crate::prelude::*;

pub const NAVBAR_SELECTOR: &str = ".navbar";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const TOGGLER_SELECTOR: &str = ".navbar-toggler";
pub const COLLAPSE_SELECTOR: &str = ".navbar-collapse";
pub const TITLE_SELECTORS: &str = ".page-title, .display-4, .display-5";
pub const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;

pub const ENHANCED_TITLE_CLASS: &str = "enhanced-title";
pub const ACTIVE_CLASS: &str = "active";
pub const COMPACT_CLASSES: [&str; 3] = ["scrolled", "compact-nav", "small-header"];

/// Vertical offset in pixels past which the navbar gets compact.
pub const SCROLL_THRESHOLD: f64 = 50.0;

/// Navbar view model.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NavbarState {
    pub is_compact: bool,
}

impl NavbarState {
    pub fn on_scroll(self, scroll_y: f64) -> Self {
        Self {
            is_compact: scroll_y > SCROLL_THRESHOLD,
        }
    }

    pub fn apply(self, document: &mut Document, navbar: ElementId) {
        if let Some(navbar) = document.get_mut(navbar) {
            for class in COMPACT_CLASSES {
                navbar.classes.toggle(class, self.is_compact);
            }
        }
    }
}

pub fn is_active_link(href: &str, path: &str) -> bool {
    href == path
}

pub struct NavbarController;

impl NavbarController {
    fn on_ready(document: &mut Document) -> Result {
        for title in document.query_selector_all(TITLE_SELECTORS)? {
            if let Some(title) = document.get_mut(title) {
                title.classes.add(ENHANCED_TITLE_CLASS);
            }
        }

        let path = document.path.clone();
        for link in document.query_selector_all(NAV_LINK_SELECTOR)? {
            if let Some(link) = document.get_mut(link) {
                let is_active = link.attribute("href").map_or(false, |href| is_active_link(href, &path));
                link.classes.toggle(ACTIVE_CLASS, is_active);
            }
        }
        Ok(())
    }

    fn on_scroll(document: &mut Document, scroll_y: f64) -> Result {
        if let Some(navbar) = document.query_selector(NAVBAR_SELECTOR)? {
            NavbarState::default().on_scroll(scroll_y).apply(document, navbar);
        }
        Ok(())
    }

    fn on_click(document: &Document, target: ElementId, dispatch: &mut Dispatch) -> Result {
        if document.query_selector_all(ANCHOR_SELECTOR)?.contains(&target) {
            dispatch.prevent_default();
            let fragment = document
                .get(target)
                .and_then(|anchor| anchor.attribute("href"))
                .and_then(|href| href.strip_prefix('#'))
                .unwrap_or_default();
            match document.get_element_by_id(fragment).filter(|_| !fragment.is_empty()) {
                Some(section) => dispatch.push(Effect::ScrollIntoView {
                    target: section,
                    smooth: true,
                }),
                None => debug!(fragment, "no anchor target"),
            }
        }

        if document.query_selector_all(NAV_LINK_SELECTOR)?.contains(&target) {
            let collapse = document.query_selector(COLLAPSE_SELECTOR)?;
            let toggler = document.query_selector(TOGGLER_SELECTOR)?;
            if let (Some(collapse), Some(toggler)) = (collapse, toggler) {
                let is_expanded = document
                    .get(collapse)
                    .map_or(false, |collapse| collapse.classes.contains("show"));
                if is_expanded {
                    dispatch.push(Effect::Click { target: toggler });
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Handler for NavbarController {
    async fn handle(&self, event: Event, document: &mut Document, dispatch: &mut Dispatch) -> Result {
        match event {
            Event::Ready => Self::on_ready(document),
            Event::Scroll { y } => Self::on_scroll(document, y),
            Event::Click { target } => Self::on_click(document, target, dispatch),
            Event::Submit { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use crate::page::Page;

    struct Fixture {
        page: Page,
        navbar: ElementId,
        toggler: ElementId,
        collapse: ElementId,
        home_link: ElementId,
        predict_link: ElementId,
        anchor: ElementId,
        dangling_anchor: ElementId,
        section: ElementId,
        title: ElementId,
    }

    fn fixture() -> Fixture {
        let mut document = Document::new("/predict");
        let navbar = document.append(None, Element::new("nav").class("navbar navbar-expand-lg"));
        let toggler = document.append(Some(navbar), Element::new("button").class("navbar-toggler"));
        let collapse = document.append(Some(navbar), Element::new("div").class("collapse navbar-collapse"));
        let home_link = document.append(
            Some(collapse),
            Element::new("a").class("nav-link active").attr("href", "/"),
        );
        let predict_link =
            document.append(Some(collapse), Element::new("a").class("nav-link").attr("href", "/predict"));
        let title = document.append(None, Element::new("h1").class("display-4"));
        let anchor = document.append(None, Element::new("a").attr("href", "#como-funciona"));
        let dangling_anchor = document.append(None, Element::new("a").attr("href", "#"));
        let section = document.append(None, Element::new("section").id("como-funciona"));
        Fixture {
            page: Page::new(document).with(NavbarController),
            navbar,
            toggler,
            collapse,
            home_link,
            predict_link,
            anchor,
            dangling_anchor,
            section,
            title,
        }
    }

    fn classes(fixture: &Fixture, id: ElementId) -> String {
        fixture.page.document().get(id).unwrap().classes.to_string()
    }

    #[test]
    fn state_ok() {
        let state = NavbarState::default();
        assert!(!state.on_scroll(50.0).is_compact);
        assert!(state.on_scroll(50.5).is_compact);
        assert!(!state.on_scroll(120.0).on_scroll(0.0).is_compact);
    }

    #[tokio::test]
    async fn scroll_ok() -> Result {
        let mut fixture = fixture();
        fixture.page.dispatch(Event::Scroll { y: 51.0 }).await?;
        assert_eq!(
            classes(&fixture, fixture.navbar),
            "navbar navbar-expand-lg scrolled compact-nav small-header",
        );
        fixture.page.dispatch(Event::Scroll { y: 80.0 }).await?;
        assert_eq!(
            classes(&fixture, fixture.navbar),
            "navbar navbar-expand-lg scrolled compact-nav small-header",
        );
        fixture.page.dispatch(Event::Scroll { y: 10.0 }).await?;
        assert_eq!(classes(&fixture, fixture.navbar), "navbar navbar-expand-lg");
        Ok(())
    }

    #[tokio::test]
    async fn ready_ok() -> Result {
        let mut fixture = fixture();
        fixture.page.ready().await?;
        assert_eq!(classes(&fixture, fixture.title), "display-4 enhanced-title");
        assert_eq!(classes(&fixture, fixture.home_link), "nav-link");
        assert_eq!(classes(&fixture, fixture.predict_link), "nav-link active");
        Ok(())
    }

    #[tokio::test]
    async fn smooth_scroll_ok() -> Result {
        let mut fixture = fixture();
        let dispatch = fixture.page.dispatch(Event::Click { target: fixture.anchor }).await?;
        assert!(dispatch.default_prevented);
        assert_eq!(
            dispatch.effects,
            vec![Effect::ScrollIntoView { target: fixture.section, smooth: true }],
        );
        Ok(())
    }

    #[tokio::test]
    async fn smooth_scroll_missing_target_ok() -> Result {
        let mut fixture = fixture();
        let dispatch = fixture.page.dispatch(Event::Click { target: fixture.dangling_anchor }).await?;
        assert!(dispatch.default_prevented);
        assert!(dispatch.effects.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn collapse_ok() -> Result {
        let mut fixture = fixture();
        let dispatch = fixture.page.dispatch(Event::Click { target: fixture.predict_link }).await?;
        assert!(!dispatch.default_prevented);
        assert!(dispatch.effects.is_empty());

        let collapse = fixture.collapse;
        fixture.page.document_mut().get_mut(collapse).unwrap().classes.add("show");
        let dispatch = fixture.page.dispatch(Event::Click { target: fixture.predict_link }).await?;
        assert_eq!(dispatch.effects, vec![Effect::Click { target: fixture.toggler }]);
        Ok(())
    }

    #[tokio::test]
    async fn scroll_without_navbar_ok() -> Result {
        let mut page = Page::new(Document::new("/")).with(NavbarController);
        page.dispatch(Event::Scroll { y: 100.0 }).await?;
        Ok(())
    }
}
