#![allow(clippy::float_cmp)]

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use super::*;
use crate::coords::Size;
use crate::input::Interaction;

// =============================================================
// Helpers
// =============================================================

fn with_surfaces(mut editor: Editor) -> Editor {
    editor.set_surface(PageSide::Single, PageSurface::new(0.0, 0.0, 800.0, 600.0));
    editor.set_surface(PageSide::Left, PageSurface::new(0.0, 0.0, 400.0, 600.0));
    editor.set_surface(PageSide::Right, PageSurface::new(400.0, 0.0, 400.0, 600.0));
    editor
}

fn editor() -> Editor {
    with_surfaces(Editor::new(CreateEditorStateInput::new("page"), EditorConfig::default()))
}

fn spread_editor() -> Editor {
    let input = CreateEditorStateInput { view_mode: Some(ViewMode::Spread), ..CreateEditorStateInput::new("page") };
    with_surfaces(Editor::new(input, EditorConfig::default()))
}

fn photo_at(editor: &mut Editor, side: Option<PageSide>, x: f64, y: f64) -> ItemId {
    let mut input = CreateItemInput::new(ItemKind::Image).at(x, y).sized(100.0, 100.0);
    input.page_side = side;
    editor.add_item(input)
}

fn ptr(x: f64, y: f64) -> PointerInput {
    PointerInput::new(1, x, y)
}

fn rect_of(editor: &Editor, id: &ItemId) -> Rect {
    editor.state().item(id).map(EditorItem::rect).unwrap_or_default()
}

// =============================================================
// Single-page gestures through the editor
// =============================================================

#[test]
fn drag_commits_only_on_pointer_up() {
    let mut e = editor();
    let id = photo_at(&mut e, None, 100.0, 100.0);
    e.mark_saved();

    e.on_pointer_down(PageSide::Single, ptr(150.0, 150.0));
    e.on_pointer_move(PageSide::Single, ptr(250.0, 170.0));
    assert_eq!(rect_of(&e, &id), Rect::new(100.0, 100.0, 100.0, 100.0));
    assert!(!e.state().is_dirty);
    assert_eq!(e.render_list(PageSide::Single)[0].rect, Rect::new(200.0, 120.0, 100.0, 100.0));

    e.on_pointer_up(PageSide::Single, ptr(250.0, 170.0));
    assert_eq!(rect_of(&e, &id), Rect::new(200.0, 120.0, 100.0, 100.0));
    assert!(e.state().is_dirty);
}

#[test]
fn drag_to_negative_local_clamps_to_origin() {
    let mut e = editor();
    let id = photo_at(&mut e, None, 100.0, 100.0);
    e.on_pointer_down(PageSide::Single, ptr(100.0, 100.0));
    e.on_pointer_move(PageSide::Single, ptr(-50.0, -50.0));
    e.on_pointer_up(PageSide::Single, ptr(-50.0, -50.0));
    let rect = rect_of(&e, &id);
    assert_eq!((rect.x, rect.y), (0.0, 0.0));
}

#[test]
fn nw_resize_scenario() {
    let mut e = editor();
    let id = photo_at(&mut e, None, 100.0, 100.0);
    assert_eq!(e.state().selected_item_id, Some(id));
    e.on_pointer_down(PageSide::Single, ptr(100.0, 100.0));
    e.on_pointer_move(PageSide::Single, ptr(80.0, 90.0));
    let actions = e.on_pointer_up(PageSide::Single, ptr(80.0, 90.0));
    assert_eq!(actions.len(), 3);
    assert_eq!(rect_of(&e, &id), Rect::new(80.0, 90.0, 120.0, 110.0));
}

#[test]
fn pointer_down_selects_hit_item() {
    let mut e = editor();
    let first = photo_at(&mut e, None, 100.0, 100.0);
    photo_at(&mut e, None, 400.0, 100.0);
    e.on_pointer_down(PageSide::Single, ptr(150.0, 150.0));
    assert_eq!(e.state().selected_item_id, Some(first));
}

#[test]
fn click_on_empty_page_clears_selection_without_dirtying() {
    let mut e = editor();
    photo_at(&mut e, None, 100.0, 100.0);
    e.mark_saved();
    e.on_click(PageSide::Single, Point::new(600.0, 500.0));
    assert!(e.state().selected_item_id.is_none());
    assert!(!e.state().is_dirty);
}

#[test]
fn text_tool_click_creates_default_text_box() {
    let mut e = editor();
    e.set_tool(Tool::Text);
    let actions = e.on_click(PageSide::Single, Point::new(300.0, 300.0));
    assert_eq!(actions, vec![Action::PlaceText { side: PageSide::Single, x: 210.0, y: 272.0 }]);

    let item = e.state().selected_item().unwrap();
    assert_eq!(item.kind(), ItemKind::Text);
    assert_eq!(item.rect(), Rect::new(210.0, 272.0, 180.0, 56.0));
    assert_eq!(item.body.text(), Some(&TextPayload::new("", 16.0, "#111827")));
}

#[test]
fn drop_adds_and_selects_item() {
    let mut e = editor();
    let data = CreateItemInput::new(ItemKind::Sticker).to_drag_data().unwrap();
    e.on_drop(PageSide::Single, Point::new(200.0, 200.0), &data);
    let item = e.state().selected_item().unwrap();
    assert_eq!(item.kind(), ItemKind::Sticker);
    assert_eq!(item.rect(), Rect::new(140.0, 140.0, 120.0, 120.0));
    assert_eq!(item.page_side, PageSide::Single);
    assert_eq!(item.z_index, 1);
}

#[test]
fn bad_drop_leaves_state_alone() {
    let mut e = editor();
    let before = e.store().snapshot();
    assert!(e.on_drop(PageSide::Single, Point::new(200.0, 200.0), "nope").is_empty());
    assert!(Arc::ptr_eq(&before, &e.store().snapshot()));
}

#[test]
fn wheel_commits_immediately() {
    let mut e = editor();
    let id = photo_at(&mut e, None, 100.0, 100.0);
    e.on_wheel(PageSide::Single, Point::new(150.0, 150.0), WheelDelta { dx: 0.0, dy: 10.0 });
    assert_eq!(rect_of(&e, &id), Rect::new(100.0, 100.0, 88.0, 88.0));
}

#[test]
fn notebook_shows_left_items_and_skips_text_placement() {
    let mut e = with_surfaces(Editor::notebook(CreateEditorStateInput::new("nb"), EditorConfig::default()));
    let left = photo_at(&mut e, Some(PageSide::Left), 100.0, 100.0);
    assert_eq!(e.render_list(PageSide::Single).len(), 1);
    e.set_tool(Tool::Text);
    let actions = e.on_click(PageSide::Single, Point::new(600.0, 500.0));
    assert_eq!(actions, vec![Action::Select { id: None }]);
    assert_eq!(e.state().items.len(), 1);
    assert_eq!(e.state().items[0].id, left);
}

// =============================================================
// Spread routing
// =============================================================

#[test]
fn spread_drag_commits_on_move() {
    let mut e = spread_editor();
    let id = photo_at(&mut e, Some(PageSide::Right), 50.0, 50.0);
    e.on_pointer_down(PageSide::Right, ptr(500.0, 100.0));
    e.on_pointer_move(PageSide::Right, ptr(500.0, 150.0));
    assert_eq!(rect_of(&e, &id), Rect::new(50.0, 100.0, 100.0, 100.0));
    assert!(e.on_pointer_up(PageSide::Right, ptr(500.0, 150.0)).is_empty());
    assert!(e.spread().interaction().is_idle());
}

#[test]
fn spread_default_side_is_left() {
    let mut e = spread_editor();
    let id = photo_at(&mut e, None, 0.0, 0.0);
    assert_eq!(e.state().item(&id).map(|i| i.page_side), Some(PageSide::Left));
}

#[test]
fn hidden_surface_events_are_ignored() {
    let mut e = spread_editor();
    photo_at(&mut e, Some(PageSide::Left), 100.0, 100.0);
    assert!(e.on_pointer_down(PageSide::Single, ptr(150.0, 150.0)).is_empty());
    assert!(e.on_click(PageSide::Single, Point::new(150.0, 150.0)).is_empty());
    assert!(e.render_list(PageSide::Single).is_empty());
    assert_eq!(e.render_list(PageSide::Left).len(), 1);

    let mut single = editor();
    assert!(single.on_pointer_down(PageSide::Right, ptr(500.0, 100.0)).is_empty());
    assert!(single.render_list(PageSide::Left).is_empty());
}

#[test]
fn spread_text_placement_on_right_page() {
    let mut e = spread_editor();
    e.set_tool(Tool::Text);
    e.on_click(PageSide::Right, Point::new(600.0, 300.0));
    let item = e.state().selected_item().unwrap();
    assert_eq!(item.page_side, PageSide::Right);
    assert_eq!((item.x, item.y), (110.0, 272.0));
}

#[test]
fn view_mode_change_abandons_gesture() {
    let mut e = editor();
    let id = photo_at(&mut e, None, 100.0, 100.0);
    e.on_pointer_down(PageSide::Single, ptr(150.0, 150.0));
    e.on_pointer_move(PageSide::Single, ptr(300.0, 300.0));
    e.set_view_mode(ViewMode::Spread);
    assert_eq!(e.state().view_mode, ViewMode::Spread);
    assert!(matches!(e.single().interaction(), Interaction::Idle));
    e.set_view_mode(ViewMode::Single);
    assert!(e.on_pointer_up(PageSide::Single, ptr(300.0, 300.0)).is_empty());
    assert_eq!(rect_of(&e, &id), Rect::new(100.0, 100.0, 100.0, 100.0));
}

// =============================================================
// Zoom
// =============================================================

#[test]
fn zoom_steps_and_bounds() {
    let mut e = editor();
    assert_eq!(e.zoom().factor(), 1.0);
    e.zoom_in();
    assert_eq!(e.zoom().factor(), 1.1);
    for _ in 0..20 {
        e.zoom_in();
    }
    assert_eq!(e.zoom().factor(), 1.6);
    for _ in 0..20 {
        e.zoom_out();
    }
    assert_eq!(e.zoom().factor(), 0.6);
    assert_eq!(e.zoom().percent(), 60);
}

#[test]
fn zoom_reaches_both_canvases() {
    let mut e = editor();
    e.set_zoom(1.25);
    assert_eq!(e.single().page_size(), Size::new(640.0, 480.0));
    assert_eq!(e.spread().page_size(SpreadSide::Left), Size::new(320.0, 480.0));
}

// =============================================================
// Toolbar and panel commands
// =============================================================

#[test]
fn add_text_uses_text_box_defaults() {
    let mut e = editor();
    let id = e.add_text("hello");
    let item = e.state().item(&id).unwrap();
    assert_eq!(item.rect(), Rect::new(40.0, 40.0, 180.0, 56.0));
    assert_eq!(item.body.text(), Some(&TextPayload::new("hello", 16.0, "#111827")));
}

#[test]
fn add_sticker_and_photo() {
    let mut e = editor();
    let sticker = e.add_sticker("🌼", "#fde68a");
    let photo = e.add_photo("https://example.test/cat.jpg");

    let item = e.state().item(&sticker).unwrap();
    assert_eq!((item.width, item.height), (110.0, 110.0));
    assert_eq!(item.body.text(), Some(&TextPayload::new("🌼", 48.0, "#fde68a")));

    let item = e.state().item(&photo).unwrap();
    assert_eq!(item.kind(), ItemKind::Image);
    assert_eq!((item.width, item.height), (220.0, 160.0));
    assert_eq!(item.body.to_payload().image_url.as_deref(), Some("https://example.test/cat.jpg"));
    assert!(item.z_index > e.state().item(&sticker).unwrap().z_index);
}

#[test]
fn sticker_carries_generated_tile() {
    let mut e = editor();
    let id = e.add_sticker("⭐", "#fef3c7");
    let payload = e.state().item(&id).unwrap().body.to_payload();
    assert_eq!(payload.image_url, Some(crate::sticker::tile_data_url("⭐", "#fef3c7")));
}

#[test]
fn add_shape_sizes_by_shape() {
    let mut e = editor();
    let circle = e.add_shape(StickerShape::Circle, "#fbcfe8");
    let square = e.add_shape(StickerShape::Rectangle, "#ddd6fe");

    let item = e.state().item(&circle).unwrap();
    assert_eq!(item.kind(), ItemKind::Sticker);
    assert_eq!((item.width, item.height), (100.0, 100.0));
    assert_eq!(item.body.text(), None);
    assert_eq!(
        item.body.to_payload().image_url.as_deref(),
        Some("https://placehold.co/200x200/fbcfe8/transparent?text=+")
    );

    let item = e.state().item(&square).unwrap();
    assert_eq!((item.width, item.height), (120.0, 120.0));
    assert_eq!(e.state().selected_item_id, Some(square));
}

#[test]
fn sticker_drag_data_drops_as_palette_sticker() {
    let mut e = editor();
    let data = Editor::sticker_drag_data("🌼", "#fde68a").unwrap();
    e.on_drop(PageSide::Single, Point::new(200.0, 200.0), &data);
    let item = e.state().selected_item().unwrap();
    assert_eq!(item.kind(), ItemKind::Sticker);
    assert_eq!(item.rect(), Rect::new(145.0, 145.0, 110.0, 110.0));
    assert_eq!(item.body.text(), Some(&TextPayload::new("🌼", 48.0, "#fde68a")));
}

#[test]
fn remove_selected_clears_selection() {
    let mut e = editor();
    photo_at(&mut e, None, 0.0, 0.0);
    assert!(e.remove_selected());
    assert!(e.state().items.is_empty());
    assert!(e.state().selected_item_id.is_none());
    assert!(!e.remove_selected());
}

#[test]
fn unknown_ids_are_noops() {
    let mut e = editor();
    photo_at(&mut e, None, 0.0, 0.0);
    e.mark_saved();
    let ghost = Uuid::new_v4();
    assert!(!e.update_item(&ghost, &ItemPatch::position(5.0, 5.0)));
    assert!(!e.remove_item(&ghost));
    assert!(!e.select_item(Some(ghost)));
    assert!(!e.state().is_dirty);
}

#[test]
fn panel_edits_apply_to_selection() {
    let mut e = editor();
    let id = e.add_text("draft");
    assert!(e.update_selected(&ItemPatch { rotation: Some(15.0), ..ItemPatch::size(10.0, 90.0) }));
    assert!(e.update_selected_text("final"));
    let item = e.state().item(&id).unwrap();
    assert_eq!((item.width, item.height, item.rotation), (40.0, 90.0, 15.0));
    assert_eq!(item.body.text().map(|t| t.content.as_str()), Some("final"));
}

#[test]
fn background_and_save_cycle() {
    let mut e = editor();
    e.set_background("#e0f2fe");
    assert!(e.state().is_dirty);
    e.mark_saved();
    assert!(!e.state().is_dirty);
    assert_eq!(e.state().background, "#e0f2fe");
}

#[test]
fn replace_items_swaps_contents() {
    let mut e = editor();
    photo_at(&mut e, None, 0.0, 0.0);
    let mut other = editor();
    let kept = photo_at(&mut other, None, 10.0, 10.0);
    e.replace_items(other.state().items.clone());
    assert_eq!(e.state().items.len(), 1);
    assert_eq!(e.state().items[0].id, kept);
    assert!(e.state().selected_item_id.is_none());
}

#[test]
fn apply_place_text_honours_side() {
    let mut e = editor();
    e.apply(&[Action::PlaceText { side: PageSide::Right, x: 5.0, y: 6.0 }, Action::RenderNeeded]);
    let item = e.state().selected_item().unwrap();
    assert_eq!(item.page_side, PageSide::Right);
    assert_eq!((item.x, item.y), (5.0, 6.0));
}

// =============================================================
// Wire shapes
// =============================================================

#[test]
fn actions_serialize_with_kind_tag() {
    let id = Uuid::new_v4();
    let value = serde_json::to_value(vec![
        Action::Select { id: None },
        Action::MoveItem { id, x: 1.0, y: 2.0 },
        Action::RenderNeeded,
    ])
    .unwrap();
    assert_eq!(
        value,
        json!([
            {"kind": "select", "id": null},
            {"kind": "moveItem", "id": id, "x": 1.0, "y": 2.0},
            {"kind": "renderNeeded"},
        ])
    );
}

#[test]
fn render_item_handles_follow_selection() {
    let mut e = editor();
    photo_at(&mut e, None, 100.0, 100.0);
    let list = e.render_list(PageSide::Single);
    let value = serde_json::to_value(&list[0]).unwrap();
    assert_eq!(value["selected"], true);
    assert_eq!(value["handles"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["handles"][0]["handle"], "nw");
    assert_eq!(value["rect"]["x"], 100.0);
}
