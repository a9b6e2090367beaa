//! Keys on the product detail and variant sub-pages.

use crossterm::event::{KeyCode, KeyEvent};

use crate::state::{AppState, Modal, Route};
use crate::util;

pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.go_back(),
        KeyCode::Left => state.gallery.prev(),
        KeyCode::Right => state.gallery.next(),
        KeyCode::Enter => {
            state.gallery.open_lightbox();
            if !state.gallery.is_empty() {
                state.modal = Modal::Lightbox;
            }
        }
        KeyCode::Char('a') => {
            if state.gallery.phase() == crate::logic::gallery::GalleryPhase::Cycling {
                state.gallery.stop_cycle();
            } else {
                state.gallery.start_cycle();
            }
        }
        KeyCode::Up => move_variant(state, -1),
        KeyCode::Down => move_variant(state, 1),
        KeyCode::Char('v') => open_selected_variant(state),
        KeyCode::Char('[') => step_sibling(state, -1),
        KeyCode::Char(']') => step_sibling(state, 1),
        KeyCode::Char('s') => share(state),
        KeyCode::Char('i') => request_info(state),
        KeyCode::Char('w') => whatsapp(state),
        KeyCode::Char(c) if c.is_ascii_digit() => open_image(state, c),
        _ => {}
    }
}

/// Digits act like thumbnail clicks: open the lightbox on that image.
fn open_image(state: &mut AppState, digit: char) {
    let Some(n) = digit.to_digit(10) else {
        return;
    };
    let n = n as usize;
    if n == 0 || n > state.gallery.len() {
        return;
    }
    state.gallery.open_lightbox_at(n - 1);
    state.modal = Modal::Lightbox;
}

fn variant_count(state: &AppState) -> usize {
    state
        .detail_product()
        .map_or(0, |p| p.valid_variants().count())
}

fn move_variant(state: &mut AppState, delta: isize) {
    let count = variant_count(state);
    if count == 0 {
        return;
    }
    let next = (state.variant_index as isize + delta).clamp(0, count as isize - 1);
    state.variant_index = next as usize;
}

/// Open the sub-page for the variant under the cursor.
fn open_selected_variant(state: &mut AppState) {
    let Route::Detail { sub: None, .. } = &state.route else {
        return;
    };
    let target = state.detail_product().and_then(|p| {
        p.valid_variants()
            .nth(state.variant_index)
            .map(|v| (p.id.clone(), v.code.clone()))
    });
    if let Some((id, code)) = target {
        state.open_detail(&id, Some(code));
    }
}

/// On a sub-page, move to the previous/next sibling variant with wraparound.
fn step_sibling(state: &mut AppState, delta: isize) {
    let Route::Detail {
        product_id,
        sub: Some(code),
    } = &state.route
    else {
        return;
    };
    let target = state.store.product_by_id(product_id).and_then(|p| {
        let codes: Vec<&str> = p.valid_variants().map(|v| v.code.as_str()).collect();
        let i = codes.iter().position(|c| *c == code)? as isize;
        let n = codes.len() as isize;
        let next = codes[(i + delta).rem_euclid(n) as usize];
        Some((p.id.clone(), next.to_string()))
    });
    if let Some((id, next)) = target {
        // replace the current sub-page instead of stacking siblings
        state.go_back();
        state.open_detail(&id, Some(next));
    }
}

fn share(state: &mut AppState) {
    if let Route::Detail { product_id, sub } = &state.route {
        let url = util::share_url(product_id, sub.as_deref());
        state.modal = Modal::ShareLink { url };
    }
}

fn request_info(state: &mut AppState) {
    let Route::Detail { sub, .. } = &state.route else {
        return;
    };
    let sub = sub.clone();
    if let Some(p) = state.detail_product() {
        let code = sub.as_deref().unwrap_or(&p.code);
        let url = util::contact_url(
            &state.settings.contact_email,
            &p.id,
            &p.name,
            code,
            &p.category,
            sub.as_deref(),
        );
        state.modal = Modal::Alert {
            title: "Richiedi informazioni".to_string(),
            message: url,
        };
    }
}

fn whatsapp(state: &mut AppState) {
    let url = util::whatsapp_url(&state.settings.whatsapp_number, &state.settings.contact_message);
    state.modal = Modal::Alert {
        title: "WhatsApp".to_string(),
        message: url,
    };
}

#[cfg(test)]
mod tests {
    use super::super::tests::{press, test_state};
    use super::super::handle_event;
    use crate::logic::gallery::GalleryPhase;
    use crate::state::{Modal, Route};
    use crossterm::event::KeyCode;

    #[test]
    fn cycle_toggle_and_lightbox() {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let mut state = test_state();
        state.open_detail("GR-1", None);
        handle_event(&mut state, press(KeyCode::Char('a')));
        assert_eq!(state.gallery.phase(), GalleryPhase::Cycling);
        handle_event(&mut state, press(KeyCode::Enter));
        assert_eq!(state.modal, Modal::Lightbox);
        assert_eq!(state.gallery.phase(), GalleryPhase::Lightbox);
    }

    #[test]
    fn variant_sub_page_navigation_wraps() {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let mut state = test_state();
        state.open_detail("GR-1", None);
        handle_event(&mut state, press(KeyCode::Char('v')));
        assert!(matches!(
            &state.route,
            Route::Detail { sub: Some(code), .. } if code == "V1"
        ));
        handle_event(&mut state, press(KeyCode::Char(']')));
        assert!(matches!(
            &state.route,
            Route::Detail { sub: Some(code), .. } if code == "V2"
        ));
        handle_event(&mut state, press(KeyCode::Char(']')));
        assert!(matches!(
            &state.route,
            Route::Detail { sub: Some(code), .. } if code == "V1"
        ));
        // Esc pops back to the parent product page
        handle_event(&mut state, press(KeyCode::Esc));
        assert!(matches!(&state.route, Route::Detail { sub: None, .. }));
    }

    #[test]
    fn digits_open_the_lightbox_on_that_image() {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let mut state = test_state();
        // GR-1 carries two images: its own plus V1's
        state.open_detail("GR-1", None);
        handle_event(&mut state, press(KeyCode::Char('2')));
        assert_eq!(state.modal, Modal::Lightbox);
        assert_eq!(state.gallery.index(), 1);
        assert_eq!(state.gallery.phase(), GalleryPhase::Lightbox);
        // inside the lightbox digits jump, out-of-range ones do nothing
        handle_event(&mut state, press(KeyCode::Char('1')));
        assert_eq!(state.gallery.index(), 0);
        handle_event(&mut state, press(KeyCode::Char('9')));
        assert_eq!(state.gallery.index(), 0);
        handle_event(&mut state, press(KeyCode::Esc));
        assert_eq!(state.modal, Modal::None);
        // closed again, a digit past the gallery stays inert
        handle_event(&mut state, press(KeyCode::Char('0')));
        assert_eq!(state.modal, Modal::None);
    }

    #[test]
    fn share_modal_carries_deep_link() {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let mut state = test_state();
        state.open_detail("GR-1", Some("V1".to_string()));
        handle_event(&mut state, press(KeyCode::Char('s')));
        assert_eq!(
            state.modal,
            Modal::ShareLink {
                url: "prodotto.html?id=GR-1&sub=V1".to_string()
            }
        );
    }
}
