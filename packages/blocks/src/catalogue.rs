//! Built-in block catalogue.
//!
//! | type             | category  |
//! |------------------|-----------|
//! | `hero`           | layout    |
//! | `rich-text`      | text      |
//! | `image-grid`     | media     |
//! | `call-to-action` | marketing |
//! | `product-grid`   | commerce  |
//! | `video-embed`    | media     |
//! | `spacer`         | layout    |
//!
//! Styling is limited to theme variable references; visual design lives
//! in the consuming front end.

use crate::definition::{BlockDefinition, RenderContext};
use crate::error::BlockResult;
use crate::instance::{props, Props};
use crate::node::RenderNode;
use crate::registry::Registry;
use crate::schema::SchemaDescriptor;
use serde_json::{json, Value};

/// Registry of every built-in block
pub fn builtin_registry() -> BlockResult<Registry> {
    Registry::register(builtin_definitions())
}

pub fn builtin_definitions() -> Vec<BlockDefinition> {
    vec![
        hero(),
        rich_text(),
        image_grid(),
        call_to_action(),
        product_grid(),
        video_embed(),
        spacer(),
    ]
}

// =============================================================================
// Prop accessors
// =============================================================================

fn str_prop<'a>(props: &'a Props, key: &str) -> &'a str {
    props.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn bool_prop(props: &Props, key: &str) -> bool {
    props.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn int_prop(props: &Props, key: &str, fallback: i64) -> i64 {
    props
        .get(key)
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .unwrap_or(fallback)
}

// =============================================================================
// Hero
// =============================================================================

pub fn hero() -> BlockDefinition {
    BlockDefinition::new("hero", "Hero banner", render_hero)
        .with_category("layout")
        .with_description("Full-width banner with headline, subtitle and a call to action")
        .with_schema(
            SchemaDescriptor::builder()
                .string("title")
                .required()
                .titled("Title")
                .string("subtitle")
                .titled("Subtitle")
                .string("backgroundImage")
                .titled("Background image URL")
                .string("ctaLabel")
                .titled("Button label")
                .string("ctaHref")
                .titled("Button link")
                .enumeration("align", ["left", "center", "right"])
                .titled("Alignment")
                .boolean("overlay")
                .titled("Darken background")
                .build(),
        )
        .with_default_props(props(json!({
            "title": "Welcome to our store",
            "subtitle": "Discover this season's collection",
            "backgroundImage": "",
            "ctaLabel": "Shop now",
            "ctaHref": "/collections/all",
            "align": "center",
            "overlay": true
        })))
}

fn render_hero(props: &Props, ctx: &RenderContext<'_>) -> RenderNode {
    let mut banner = RenderNode::element("div")
        .with_attr("class", "pc-hero")
        .with_style("text-align", match str_prop(props, "align") {
            "" => "center",
            align => align,
        })
        .with_style("background-color", ctx.tokens.var("colors.surface"));

    let image = str_prop(props, "backgroundImage");
    if !image.is_empty() {
        banner = banner
            .with_style("background-image", format!("url(\"{}\")", image))
            .with_style("background-size", "cover");
    }
    if bool_prop(props, "overlay") {
        banner = banner.with_attr("data-overlay", "true");
    }

    banner = banner.with_child(
        RenderNode::element("h1")
            .with_style("font-family", ctx.tokens.var("fonts.heading"))
            .with_style("color", ctx.tokens.var("colors.text"))
            .with_child(RenderNode::text(str_prop(props, "title"))),
    );

    let subtitle = str_prop(props, "subtitle");
    if !subtitle.is_empty() {
        banner = banner.with_child(RenderNode::element("p").with_child(RenderNode::text(subtitle)));
    }

    let label = str_prop(props, "ctaLabel");
    if !label.is_empty() {
        banner = banner.with_child(button(label, str_prop(props, "ctaHref"), "colors.primary", ctx));
    }

    banner
}

// =============================================================================
// Rich text
// =============================================================================

pub fn rich_text() -> BlockDefinition {
    BlockDefinition::new("rich-text", "Rich text", render_rich_text)
        .with_category("text")
        .with_description("Heading and paragraphs; blank lines separate paragraphs")
        .with_schema(
            SchemaDescriptor::builder()
                .string("heading")
                .titled("Heading")
                .string("body")
                .required()
                .titled("Body")
                .build(),
        )
        .with_default_props(props(json!({
            "heading": "",
            "body": "Tell your story here."
        })))
}

fn render_rich_text(props: &Props, ctx: &RenderContext<'_>) -> RenderNode {
    let mut article = RenderNode::element("article")
        .with_attr("class", "pc-rich-text")
        .with_style("font-family", ctx.tokens.var("fonts.body"));

    let heading = str_prop(props, "heading");
    if !heading.is_empty() {
        article = article.with_child(
            RenderNode::element("h2")
                .with_style("font-family", ctx.tokens.var("fonts.heading"))
                .with_child(RenderNode::text(heading)),
        );
    }

    let paragraphs = str_prop(props, "body")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| RenderNode::element("p").with_child(RenderNode::text(p)));

    article.with_children(paragraphs)
}

// =============================================================================
// Image grid
// =============================================================================

pub fn image_grid() -> BlockDefinition {
    BlockDefinition::new("image-grid", "Image grid", render_image_grid)
        .with_category("media")
        .with_description("Responsive grid of images")
        .with_schema(
            SchemaDescriptor::builder()
                .array("images")
                .required()
                .titled("Images")
                .integer("columns")
                .titled("Columns")
                .default_value(3)
                .string("gap")
                .titled("Gap")
                .build(),
        )
        .with_default_props(props(json!({
            "images": [],
            "columns": 3,
            "gap": "16px"
        })))
}

fn render_image_grid(props: &Props, ctx: &RenderContext<'_>) -> RenderNode {
    let columns = int_prop(props, "columns", 3).clamp(1, 12);
    let gap = match str_prop(props, "gap") {
        "" => ctx.tokens.var("spacing.md"),
        gap => gap.to_string(),
    };

    let images = props
        .get("images")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    // Entries are `{src, alt}` objects or bare URL strings
    let figures = images.iter().filter_map(|entry| {
        let (src, alt) = match entry {
            Value::String(src) => (src.as_str(), ""),
            Value::Object(obj) => (
                obj.get("src").and_then(Value::as_str).unwrap_or_default(),
                obj.get("alt").and_then(Value::as_str).unwrap_or_default(),
            ),
            _ => return None,
        };
        if src.is_empty() {
            return None;
        }
        Some(
            RenderNode::element("img")
                .with_attr("src", src)
                .with_attr("alt", alt)
                .with_attr("loading", "lazy"),
        )
    });

    RenderNode::element("div")
        .with_attr("class", "pc-image-grid")
        .with_style("display", "grid")
        .with_style("grid-template-columns", format!("repeat({}, 1fr)", columns))
        .with_style("gap", gap)
        .with_children(figures)
}

// =============================================================================
// Call to action
// =============================================================================

pub fn call_to_action() -> BlockDefinition {
    BlockDefinition::new("call-to-action", "Call to action", render_call_to_action)
        .with_category("marketing")
        .with_description("Short pitch with a single prominent button")
        .with_schema(
            SchemaDescriptor::builder()
                .string("heading")
                .required()
                .titled("Heading")
                .string("body")
                .titled("Body")
                .string("buttonLabel")
                .required()
                .titled("Button label")
                .string("buttonHref")
                .titled("Button link")
                .enumeration("variant", ["primary", "secondary", "accent"])
                .titled("Style")
                .build(),
        )
        .with_default_props(props(json!({
            "heading": "Ready to get started?",
            "body": "",
            "buttonLabel": "Get started",
            "buttonHref": "#",
            "variant": "primary"
        })))
}

fn render_call_to_action(props: &Props, ctx: &RenderContext<'_>) -> RenderNode {
    let color_key = match str_prop(props, "variant") {
        "secondary" => "colors.secondary",
        "accent" => "colors.accent",
        _ => "colors.primary",
    };

    let mut panel = RenderNode::element("div")
        .with_attr("class", "pc-cta")
        .with_style("border-radius", ctx.tokens.var("radii.md"))
        .with_child(
            RenderNode::element("h2")
                .with_style("font-family", ctx.tokens.var("fonts.heading"))
                .with_child(RenderNode::text(str_prop(props, "heading"))),
        );

    let body = str_prop(props, "body");
    if !body.is_empty() {
        panel = panel.with_child(RenderNode::element("p").with_child(RenderNode::text(body)));
    }

    panel.with_child(button(
        str_prop(props, "buttonLabel"),
        str_prop(props, "buttonHref"),
        color_key,
        ctx,
    ))
}

// =============================================================================
// Product grid
// =============================================================================

pub fn product_grid() -> BlockDefinition {
    BlockDefinition::new("product-grid", "Product grid", render_product_grid)
        .with_category("commerce")
        .with_description("Products from a catalogue collection, filled in by the storefront")
        .with_schema(
            SchemaDescriptor::builder()
                .string("title")
                .titled("Title")
                .string("collectionHandle")
                .required()
                .titled("Collection")
                .integer("limit")
                .titled("Products shown")
                .default_value(8)
                .boolean("showPrices")
                .titled("Show prices")
                .build(),
        )
        .with_default_props(props(json!({
            "title": "Featured products",
            "collectionHandle": "featured",
            "limit": 8,
            "showPrices": true
        })))
}

/// The grid itself comes from the commerce service; this emits the mount
/// point and the query it needs.
fn render_product_grid(props: &Props, ctx: &RenderContext<'_>) -> RenderNode {
    let limit = int_prop(props, "limit", 8).clamp(1, 48);

    let mut grid = RenderNode::element("div")
        .with_attr("class", "pc-product-grid")
        .with_attr("data-collection", str_prop(props, "collectionHandle"))
        .with_attr("data-limit", limit.to_string())
        .with_attr("data-show-prices", bool_prop(props, "showPrices").to_string());

    let title = str_prop(props, "title");
    if !title.is_empty() {
        grid = grid.with_child(
            RenderNode::element("h2")
                .with_style("font-family", ctx.tokens.var("fonts.heading"))
                .with_child(RenderNode::text(title)),
        );
    }

    grid
}

// =============================================================================
// Video embed
// =============================================================================

pub fn video_embed() -> BlockDefinition {
    BlockDefinition::new("video-embed", "Video", render_video_embed)
        .with_category("media")
        .with_description("YouTube or Vimeo video")
        .with_schema(
            SchemaDescriptor::builder()
                .string("url")
                .required()
                .titled("Video URL")
                .string("title")
                .titled("Accessible title")
                .boolean("autoplay")
                .titled("Autoplay (muted)")
                .enumeration("aspectRatio", ["16:9", "4:3", "1:1"])
                .titled("Aspect ratio")
                .build(),
        )
        .with_default_props(props(json!({
            "url": "",
            "title": "Video",
            "autoplay": false,
            "aspectRatio": "16:9"
        })))
}

fn render_video_embed(props: &Props, _ctx: &RenderContext<'_>) -> RenderNode {
    let url = str_prop(props, "url").trim();
    if url.is_empty() {
        return RenderNode::element("div")
            .with_attr("class", "pc-video pc-video--empty")
            .with_child(RenderNode::text("No video selected"));
    }

    let mut src = embed_url(url);
    if bool_prop(props, "autoplay") {
        src.push_str(if src.contains('?') { "&" } else { "?" });
        src.push_str("autoplay=1&mute=1");
    }

    let ratio = match str_prop(props, "aspectRatio") {
        "4:3" => "4 / 3",
        "1:1" => "1 / 1",
        _ => "16 / 9",
    };

    RenderNode::element("div")
        .with_attr("class", "pc-video")
        .with_style("aspect-ratio", ratio)
        .with_child(
            RenderNode::element("iframe")
                .with_attr("src", src)
                .with_attr("title", str_prop(props, "title"))
                .with_attr("allow", "autoplay; encrypted-media; picture-in-picture")
                .with_attr("allowfullscreen", "true"),
        )
}

/// Normalize YouTube and Vimeo page URLs to their embed form. Other URLs
/// are returned unchanged.
pub fn embed_url(url: &str) -> String {
    let without_scheme = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.")
        .trim_start_matches("m.");

    if let Some(rest) = without_scheme.strip_prefix("youtube.com/watch") {
        let query = rest.trim_start_matches('?');
        if let Some(id) = query
            .split('&')
            .find_map(|pair| pair.strip_prefix("v="))
            .filter(|id| !id.is_empty())
        {
            return format!("https://www.youtube.com/embed/{}", id);
        }
    }
    if let Some(rest) = without_scheme.strip_prefix("youtu.be/") {
        let id = rest.split(['?', '/']).next().unwrap_or_default();
        if !id.is_empty() {
            return format!("https://www.youtube.com/embed/{}", id);
        }
    }
    if let Some(rest) = without_scheme.strip_prefix("vimeo.com/") {
        let id = rest.split(['?', '/']).next().unwrap_or_default();
        if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
            return format!("https://player.vimeo.com/video/{}", id);
        }
    }

    url.to_string()
}

// =============================================================================
// Spacer
// =============================================================================

pub fn spacer() -> BlockDefinition {
    BlockDefinition::new("spacer", "Spacer", render_spacer)
        .with_category("layout")
        .with_description("Vertical whitespace")
        .with_schema(
            SchemaDescriptor::builder()
                .integer("height")
                .required()
                .titled("Height (px)")
                .default_value(48)
                .build(),
        )
        .with_default_props(props(json!({ "height": 48 })))
}

fn render_spacer(props: &Props, _ctx: &RenderContext<'_>) -> RenderNode {
    let height = int_prop(props, "height", 48).clamp(0, 1000);
    RenderNode::element("div")
        .with_attr("class", "pc-spacer")
        .with_attr("aria-hidden", "true")
        .with_style("height", format!("{}px", height))
}

fn button(label: &str, href: &str, color_key: &str, ctx: &RenderContext<'_>) -> RenderNode {
    RenderNode::element("a")
        .with_attr("class", "pc-button")
        .with_attr("href", if href.is_empty() { "#" } else { href })
        .with_style("background-color", ctx.tokens.var(color_key))
        .with_style("border-radius", ctx.tokens.var("radii.sm"))
        .with_child(RenderNode::text(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::BlockInstance;
    use crate::renderer::Renderer;
    use pagecraft_theme::{presets, resolve, EffectiveTokens, ThemeOverrides};

    fn tokens() -> EffectiveTokens {
        resolve(&presets::classic().tokens, &ThemeOverrides::new())
    }

    fn render_default(block_type: &str) -> RenderNode {
        let registry = builtin_registry().unwrap();
        let def = registry.lookup(block_type).unwrap();
        let block = BlockInstance::new("b1", block_type, def.instantiate_props());
        let tokens = tokens();
        Renderer::new(&registry, &tokens).render(&block)
    }

    #[test]
    fn test_every_builtin_renders_its_defaults() {
        let registry = builtin_registry().unwrap();
        assert_eq!(registry.len(), 7);
        for def in registry.definitions() {
            let node = render_default(&def.block_type);
            assert!(!node.is_fallback(), "{} fell back", def.block_type);
        }
    }

    #[test]
    fn test_default_props_satisfy_required_fields() {
        for def in builtin_definitions() {
            for prop in def.schema.properties().iter().filter(|p| p.required) {
                assert!(
                    def.default_props.contains_key(&prop.name),
                    "{} default props miss {}",
                    def.block_type,
                    prop.name
                );
            }
        }
    }

    #[test]
    fn test_hero_renders_title_and_button() {
        let node = render_default("hero");
        assert!(node.text_content().contains("Welcome to our store"));
        let link = node.find_tag("a").unwrap();
        assert_eq!(link.attr("href"), Some("/collections/all"));
        assert_eq!(
            link.style("background-color"),
            Some("var(--color-primary, #1f4fd6)")
        );
    }

    #[test]
    fn test_rich_text_splits_paragraphs() {
        let registry = builtin_registry().unwrap();
        let block = BlockInstance::new(
            "b1",
            "rich-text",
            props(json!({ "body": "One.\n\nTwo.\n\n\n" })),
        );
        let tokens = tokens();
        let node = Renderer::new(&registry, &tokens).render(&block);
        let article = node.find_tag("article").unwrap();
        assert_eq!(article.children().len(), 2);
    }

    #[test]
    fn test_image_grid_skips_bad_entries() {
        let registry = builtin_registry().unwrap();
        let block = BlockInstance::new(
            "b1",
            "image-grid",
            props(json!({
                "images": ["/a.png", { "src": "/b.png", "alt": "B" }, 42, { "alt": "no src" }],
                "columns": 40
            })),
        );
        let tokens = tokens();
        let node = Renderer::new(&registry, &tokens).render(&block);
        let grid = node.find_tag("div").unwrap();
        assert_eq!(grid.children().len(), 2);
        assert_eq!(grid.style("grid-template-columns"), Some("repeat(12, 1fr)"));
    }

    #[test]
    fn test_video_urls_are_normalized() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=abc123&t=10"),
            "https://www.youtube.com/embed/abc123"
        );
        assert_eq!(embed_url("https://youtu.be/xyz?si=1"), "https://www.youtube.com/embed/xyz");
        assert_eq!(embed_url("https://vimeo.com/76979871"), "https://player.vimeo.com/video/76979871");
        assert_eq!(embed_url("https://example.com/clip.mp4"), "https://example.com/clip.mp4");
    }

    #[test]
    fn test_empty_video_shows_placeholder() {
        let node = render_default("video-embed");
        assert!(node.find_tag("iframe").is_none());
        assert!(node.text_content().contains("No video selected"));
    }

    #[test]
    fn test_product_grid_exposes_collection_query() {
        let node = render_default("product-grid");
        let grid = node.find_tag("div").unwrap();
        assert_eq!(grid.attr("data-collection"), Some("featured"));
        assert_eq!(grid.attr("data-limit"), Some("8"));
    }
}
