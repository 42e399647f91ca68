use ratatui::style::Color;

/// Mix `from` toward `to` by `amount` in `[0, 1]`.
///
/// Only RGB pairs can be interpolated; anything else returns `None`.
pub fn blend(from: Color, to: Color, amount: f32) -> Option<Color> {
    let (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) = (from, to) else {
        return None;
    };
    let t = amount.clamp(0.0, 1.0);
    let lerp = |start: u8, end: u8| {
        let value = f32::from(start) + (f32::from(end) - f32::from(start)) * t;
        value.round().clamp(0.0, 255.0) as u8
    };
    Some(Color::Rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1)))
}
