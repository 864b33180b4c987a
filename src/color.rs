use display::Pixel;

use std::fmt;

/// An integer rgb triplet as produced by the HSB conversion.
///
/// Channels are not clamped, so a color with saturation or brightness
/// outside of `0.0..=1.0` can produce values outside of `0..=255`.
pub type Rgb = (i32, i32, i32);

/// A hue / saturation / brightness color.
///
/// All three components are nominally in `0.0..=1.0`. The hue wraps with
/// a period of `1.0`.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct HsbColor {
    pub h: f64,
    pub s: f64,
    pub b: f64,
}

/// One of the three components of a `HsbColor`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HsbChannel {
    Hue,
    Saturation,
    Brightness,
}

/// The errors which can occur when narrowing a color to a `Pixel`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ColorError {
    OutOfGamut(Rgb),
}

impl HsbColor {
    pub fn new(h: f64, s: f64, b: f64) -> Self {
        HsbColor { h, s, b }
    }

    /// Converts the color into a rgb triplet.
    ///
    /// The hue ramp has three lobes (red, green, blue) spaced one third of
    /// the hue range apart, each a triangle one lobe wide. The top of the
    /// range folds back into the red lobe. Each channel is the brightness
    /// pulled towards zero by the saturation where its lobe contributes
    /// nothing, and truncated (not rounded) after scaling to 255.
    pub fn rgb(&self) -> Rgb {
        let normal_h = (self.h * 3.0).rem_euclid(3.0);
        let hr = lobe(normal_h, 0.0) + lobe(normal_h, 3.0);
        let hg = lobe(normal_h, 1.0);
        let hb = lobe(normal_h, 2.0);
        let grey = self.s * self.b;
        (
            scale(self.b - grey * (1.0 - hr)),
            scale(self.b - grey * (1.0 - hg)),
            scale(self.b - grey * (1.0 - hb)),
        )
    }

    /// Converts the color into a `Pixel` for the LED matrix.
    pub fn pixel(&self) -> Result<Pixel, ColorError> {
        to_pixel(self.rgb())
    }

    pub fn channel(&self, channel: HsbChannel) -> f64 {
        match channel {
            HsbChannel::Hue => self.h,
            HsbChannel::Saturation => self.s,
            HsbChannel::Brightness => self.b,
        }
    }

    pub fn set_channel(&mut self, channel: HsbChannel, value: f64) {
        match channel {
            HsbChannel::Hue => self.h = value,
            HsbChannel::Saturation => self.s = value,
            HsbChannel::Brightness => self.b = value,
        }
    }
}

impl fmt::Display for HsbColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "HSBColor(h={:.2}, s={:.2}, b={:.2})", self.h, self.s, self.b)
    }
}

impl HsbChannel {
    const CHANNELS: [HsbChannel; 3] = [
        HsbChannel::Hue,
        HsbChannel::Saturation,
        HsbChannel::Brightness,
    ];

    pub fn next(&self) -> Self {
        Self::CHANNELS[(*self as usize + 1) % 3]
    }

    pub fn prev(&self) -> Self {
        Self::CHANNELS[(*self as usize + 2) % 3]
    }

    pub fn label(&self) -> &'static str {
        match *self {
            HsbChannel::Hue => "hue",
            HsbChannel::Saturation => "saturation",
            HsbChannel::Brightness => "brightness",
        }
    }
}

impl Default for HsbChannel {
    fn default() -> Self { HsbChannel::Hue }
}

/// Narrows a rgb triplet to a `Pixel`, failing if any channel is outside
/// of `0..=255`.
pub fn to_pixel(rgb: Rgb) -> Result<Pixel, ColorError> {
    let (r, g, b) = rgb;
    if [r, g, b].iter().all(|c| *c >= 0 && *c <= 255) {
        Ok((r as u8, g as u8, b as u8))
    } else {
        Err(ColorError::OutOfGamut(rgb))
    }
}

/// Triangular contribution of the lobe centred on `offset`.
fn lobe(normal_h: f64, offset: f64) -> f64 {
    1.0 - (normal_h - offset).abs().min(1.0)
}

fn scale(channel: f64) -> i32 {
    // `as` truncates towards zero
    (channel * 255.0) as i32
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ColorError::OutOfGamut((r, g, b)) => {
                write!(f, "color ({}, {}, {}) is outside of the rgb888 gamut", r, g, b)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_black() {
        assert_eq!(HsbColor::default(), HsbColor::new(0.0, 0.0, 0.0));
        assert_eq!(HsbColor::default().rgb(), (0, 0, 0));
    }

    #[test]
    fn no_saturation_at_full_brightness_is_white() {
        assert_eq!(HsbColor::new(0.0, 0.0, 1.0).rgb(), (255, 255, 255));
        assert_eq!(HsbColor::new(0.6, 0.0, 1.0).rgb(), (255, 255, 255));
    }

    #[test]
    fn zero_brightness_is_black() {
        for &(h, s) in [(0.0, 0.0), (0.3, 1.0), (0.75, 0.5), (1.0, 1.0)].iter() {
            assert_eq!(HsbColor::new(h, s, 0.0).rgb(), (0, 0, 0));
        }
    }

    #[test]
    fn lobe_centres() {
        assert_eq!(HsbColor::new(0.0, 1.0, 1.0).rgb(), (255, 0, 0));
        // Between the green and blue lobes: 0.5 * 255 truncates to 127
        assert_eq!(HsbColor::new(0.5, 1.0, 1.0).rgb(), (0, 127, 127));
    }

    #[test]
    fn top_of_hue_range_folds_into_red() {
        // normalised hue 2.25: blue lobe 0.75, wrapped red lobe 0.25
        assert_eq!(HsbColor::new(0.75, 1.0, 1.0).rgb(), (63, 0, 191));
    }

    #[test]
    fn half_saturation_pulls_towards_brightness() {
        // r = 1.0, g = b = 1.0 - 0.5
        assert_eq!(HsbColor::new(0.0, 0.5, 1.0).rgb(), (255, 127, 127));
        // channels scale with brightness before truncation
        assert_eq!(HsbColor::new(0.0, 1.0, 0.5).rgb(), (127, 0, 0));
    }

    #[test]
    fn hue_has_a_period_of_one() {
        for &h in [0.0, 0.125, 0.25, 0.5, 0.75, 0.875].iter() {
            let c = HsbColor::new(h, 0.75, 0.5);
            let shifted = HsbColor::new(h + 1.0, 0.75, 0.5);
            assert_eq!(c.rgb(), shifted.rgb(), "hue {}", h);
        }
        assert_eq!(HsbColor::new(-0.25, 1.0, 1.0).rgb(), HsbColor::new(0.75, 1.0, 1.0).rgb());
    }

    #[test]
    fn in_range_inputs_stay_in_gamut() {
        let steps: Vec<f64> = (0..=20).map(|i| i as f64 / 20.0).collect();
        for &h in steps.iter() {
            for &s in steps.iter() {
                for &b in steps.iter() {
                    let c = HsbColor::new(h, s, b);
                    assert!(c.pixel().is_ok(), "{} gave {:?}", c, c.rgb());
                }
            }
        }
    }

    #[test]
    fn out_of_range_inputs_are_not_clamped() {
        let c = HsbColor::new(0.0, 0.0, 2.0);
        assert_eq!(c.rgb(), (510, 510, 510));
        assert_eq!(c.pixel(), Err(ColorError::OutOfGamut((510, 510, 510))));

        let c = HsbColor::new(0.5, 2.0, 1.0);
        assert_eq!(c.rgb(), (-255, 0, 0));
        assert!(c.pixel().is_err());
    }

    #[test]
    fn channels_cycle_both_ways() {
        let hue = HsbChannel::Hue;
        assert_eq!(hue.next(), HsbChannel::Saturation);
        assert_eq!(hue.next().next().next(), HsbChannel::Hue);
        assert_eq!(hue.prev(), HsbChannel::Brightness);
        assert_eq!(hue.prev().next(), HsbChannel::Hue);
    }

    #[test]
    fn channel_accessors() {
        let mut c = HsbColor::new(0.1, 0.2, 0.3);
        assert_eq!(c.channel(HsbChannel::Saturation), 0.2);
        c.set_channel(HsbChannel::Brightness, 0.9);
        assert_eq!(c, HsbColor::new(0.1, 0.2, 0.9));
    }

    #[test]
    fn display_matches_status_format() {
        let c = HsbColor::new(1.0, 0.5, 0.25);
        assert_eq!(c.to_string(), "HSBColor(h=1.00, s=0.50, b=0.25)");
    }
}
