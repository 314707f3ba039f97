use core::marker::PhantomData;

pub mod bounded;

/// Tone output seam. `play_tone` always gets the note length, drivers that
/// can't stop on their own may ignore it, the player silences them with
/// `no_tone` when the melody ends.
pub trait PlayTone {
    type Pin: Copy;

    fn play_tone(&mut self, pin: Self::Pin, freq: u16, duration_ms: u32);
    fn no_tone(&mut self, pin: Self::Pin);

    fn can_play_tone(&self, _freq: u16) -> bool {
        true
    }
}

impl<T: PlayTone + ?Sized> PlayTone for &mut T {
    type Pin = T::Pin;

    fn play_tone(&mut self, pin: Self::Pin, freq: u16, duration_ms: u32) {
        (**self).play_tone(pin, freq, duration_ms)
    }

    fn no_tone(&mut self, pin: Self::Pin) {
        (**self).no_tone(pin)
    }

    fn can_play_tone(&self, freq: u16) -> bool {
        (**self).can_play_tone(freq)
    }
}

/// Builds a driver out of a tone and a no-tone routine.
pub struct ToneFns<P, T, N> {
    tone: T,
    no_tone: N,
    _pin: PhantomData<P>,
}

impl<P, T, N> ToneFns<P, T, N>
where
    P: Copy,
    T: FnMut(P, u16, u32),
    N: FnMut(P),
{
    pub fn new(tone: T, no_tone: N) -> Self {
        Self {
            tone,
            no_tone,
            _pin: PhantomData,
        }
    }
}

impl<P, T, N> PlayTone for ToneFns<P, T, N>
where
    P: Copy,
    T: FnMut(P, u16, u32),
    N: FnMut(P),
{
    type Pin = P;

    fn play_tone(&mut self, pin: P, freq: u16, duration_ms: u32) {
        (self.tone)(pin, freq, duration_ms)
    }

    fn no_tone(&mut self, pin: P) {
        (self.no_tone)(pin)
    }
}
