//! Value sampling for generator ticks

use crate::config::ValueRange;
use crate::types::ChannelSet;
use rand::Rng;

/// Draw one value uniformly from the inclusive range
pub fn sample<R: Rng + ?Sized>(rng: &mut R, range: ValueRange) -> i64 {
    rng.gen_range(range.min()..=range.max())
}

/// Append one freshly sampled value to every channel
///
/// Channels are sampled independently; a channel never sees another
/// channel's value.
pub fn append_tick<R: Rng + ?Sized>(rng: &mut R, range: ValueRange, channels: &mut ChannelSet) {
    for channel in channels.iter_mut() {
        channel.push(sample(rng, range));
    }
}
