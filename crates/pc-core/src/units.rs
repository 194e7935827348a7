//! Flow quantities for display conversions.

use uom::si::f64::VolumeRate;
use uom::si::volume_rate::{cubic_meter_per_hour, liter_per_second};

/// Flow in litres per second, the unit of every curve array.
#[inline]
pub fn lps(v: f64) -> VolumeRate {
    VolumeRate::new::<liter_per_second>(v)
}

#[inline]
pub fn to_m3_per_h(q: VolumeRate) -> f64 {
    q.get::<cubic_meter_per_hour>()
}
