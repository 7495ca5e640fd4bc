use layout::BoxSize;

/// Gap between the button and the input's border, in px.
pub const BUTTON_SPACING: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonPlacement {
    pub top: f32,
    pub right: f32,
    /// Content height to force when the button would not fit the input.
    pub capped_height: Option<f32>,
}

/// Center the button vertically inside the input's borders and inset it from
/// the right border. The button never grows past the interior minus spacing.
pub fn place_button(input: &BoxSize, button: &BoxSize) -> ButtonPlacement {
    let interior = input.interior_height();
    let cap = (interior - 2.0 * BUTTON_SPACING).max(0.0);
    let height = button.outer_height.min(cap);

    let capped_height = (button.outer_height > cap).then(|| {
        let chrome = button.outer_height - button.content_height;
        (height - chrome).max(0.0)
    });

    ButtonPlacement {
        top: input.border_top + (interior - height) / 2.0,
        right: input.border_right + BUTTON_SPACING,
        capped_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(content: f32, outer: f32, top: f32, right: f32, bottom: f32) -> BoxSize {
        BoxSize {
            content_height: content,
            outer_height: outer,
            border_top: top,
            border_right: right,
            border_bottom: bottom,
        }
    }

    #[test]
    fn small_button_is_centered() {
        // 40px tall input with 2px borders: 36px interior
        let input = size(30.0, 40.0, 2.0, 2.0, 2.0);
        let button = size(16.0, 16.0, 0.0, 0.0, 0.0);
        let p = place_button(&input, &button);
        assert_eq!(p.top, 12.0);
        assert_eq!(p.right, 6.0);
        assert_eq!(p.capped_height, None);
    }

    #[test]
    fn tall_button_is_capped_to_interior() {
        let input = size(14.0, 22.0, 1.0, 3.0, 1.0);
        let button = size(20.0, 24.0, 2.0, 0.0, 2.0);
        let p = place_button(&input, &button);
        // interior 20, cap 12, button chrome 4
        assert_eq!(p.capped_height, Some(8.0));
        assert_eq!(p.top, 5.0);
        assert_eq!(p.right, 7.0);
    }

    #[test]
    fn tiny_input_caps_at_zero() {
        let input = size(2.0, 6.0, 1.0, 1.0, 1.0);
        let button = size(16.0, 16.0, 0.0, 0.0, 0.0);
        let p = place_button(&input, &button);
        assert_eq!(p.capped_height, Some(0.0));
        assert_eq!(p.top, 3.0);
    }
}
