use num_traits::clamp;

use super::PlayTone;

pub const BUZZER_MIN_FREQ: u16 = 35;
pub const BUZZER_MAX_FREQ: u16 = 7000;

/// Keeps every tone inside what a piezo buzzer can reproduce.
pub struct BoundedTone<D: PlayTone> {
    driver: D,

    min_freq: u16,
    max_freq: u16,
}

impl<D: PlayTone> BoundedTone<D> {
    pub fn new(driver: D) -> Self {
        Self::new_with_limits(driver, BUZZER_MIN_FREQ, BUZZER_MAX_FREQ)
    }

    pub fn new_with_limits(driver: D, min_freq: u16, max_freq: u16) -> Self {
        BoundedTone {
            driver,
            min_freq,
            max_freq,
        }
    }

    pub fn into_inner(self) -> D {
        self.driver
    }
}

impl<D: PlayTone> PlayTone for BoundedTone<D> {
    type Pin = D::Pin;

    fn play_tone(&mut self, pin: Self::Pin, freq: u16, duration_ms: u32) {
        if freq == 0 {
            self.driver.no_tone(pin);
        } else {
            let freq = clamp(freq, self.min_freq, self.max_freq);
            self.driver.play_tone(pin, freq, duration_ms);
        }
    }

    fn no_tone(&mut self, pin: Self::Pin) {
        self.driver.no_tone(pin);
    }

    fn can_play_tone(&self, freq: u16) -> bool {
        self.min_freq < freq && freq < self.max_freq && self.driver.can_play_tone(freq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::audio::ToneFns;

    #[test]
    fn clamps_into_range() {
        let mut tones = std::vec::Vec::new();
        let mut silenced = 0;
        {
            let mut buzzer = BoundedTone::new(ToneFns::new(
                |_pin: (), freq: u16, _dur: u32| tones.push(freq),
                |_pin: ()| silenced += 1,
            ));
            buzzer.play_tone((), 10, 100);
            buzzer.play_tone((), 440, 100);
            buzzer.play_tone((), 9000, 100);
            buzzer.play_tone((), 0, 100);

            assert!(buzzer.can_play_tone(3951));
            assert!(!buzzer.can_play_tone(BUZZER_MIN_FREQ));
            assert!(!buzzer.can_play_tone(8000));
        }

        assert_eq!(tones, [BUZZER_MIN_FREQ, 440, BUZZER_MAX_FREQ]);
        assert_eq!(silenced, 1);
    }
}
