/// Keyframe drivers that animate node transforms.
///
/// A driver targets one channel (translation, scale or rotation) of one
/// node. Values are stored flat: 3 floats per key for vectors, 4 (x, y, z, w)
/// for rotations.

use glam::{Quat, Vec3};
use crate::engine_warn;
use super::scene::Scene;

/// Transform channel written by a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Translation,
    Scale,
    Rotation,
}

impl Channel {
    /// Floats per key
    pub fn width(self) -> usize {
        match self {
            Channel::Translation | Channel::Scale => 3,
            Channel::Rotation => 4,
        }
    }
}

/// How values between two keys are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Hold the previous key
    Step,
    /// Component-wise lerp (normalised lerp for rotations)
    #[default]
    Linear,
    /// Spherical interpolation for rotations, lerp for vectors
    Slerp,
}

/// A sampled channel value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelValue {
    Vector(Vec3),
    Rotation(Quat),
}

/// Keyframed animation of one node channel
#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub name: String,
    /// Target node index
    pub node: u32,
    pub channel: Channel,
    /// Key times in seconds, non-decreasing
    pub times: Vec<f32>,
    /// `times.len() * channel.width()` floats
    pub values: Vec<f32>,
    pub interpolation: Interpolation,
}

impl Driver {
    /// True if there is at least one key and the value count matches the channel width
    pub fn is_well_formed(&self) -> bool {
        !self.times.is_empty() && self.values.len() == self.times.len() * self.channel.width()
    }

    /// Sample the channel at time `t`
    ///
    /// Times before the first key or after the last one clamp to that key.
    /// Returns `None` for a malformed driver.
    pub fn sample(&self, t: f32) -> Option<ChannelValue> {
        if !self.is_well_formed() {
            return None;
        }

        let next = self.times.partition_point(|&key| key <= t);
        if next == 0 {
            return Some(self.key(0));
        }
        if next == self.times.len() {
            return Some(self.key(next - 1));
        }

        let (prev, t0, t1) = (next - 1, self.times[next - 1], self.times[next]);
        let u = (t - t0) / (t1 - t0);
        let value = match (self.interpolation, self.key(prev), self.key(next)) {
            (Interpolation::Step, a, _) => a,
            (_, ChannelValue::Vector(a), ChannelValue::Vector(b)) => ChannelValue::Vector(a.lerp(b, u)),
            (Interpolation::Linear, ChannelValue::Rotation(a), ChannelValue::Rotation(b)) => {
                // Shortest arc
                let b = if a.dot(b) < 0.0 { -b } else { b };
                ChannelValue::Rotation(a.lerp(b, u).normalize())
            }
            (Interpolation::Slerp, ChannelValue::Rotation(a), ChannelValue::Rotation(b)) => {
                ChannelValue::Rotation(a.slerp(b, u))
            }
            (_, a, _) => a,
        };
        Some(value)
    }

    fn key(&self, index: usize) -> ChannelValue {
        let width = self.channel.width();
        let v = &self.values[index * width..(index + 1) * width];
        match self.channel {
            Channel::Translation | Channel::Scale => ChannelValue::Vector(Vec3::new(v[0], v[1], v[2])),
            Channel::Rotation => {
                let q = Quat::from_xyzw(v[0], v[1], v[2], v[3]);
                ChannelValue::Rotation(if q.length_squared() > 0.0 { q.normalize() } else { Quat::IDENTITY })
            }
        }
    }
}

/// Write every driver's value at time `t` into its node's transform
///
/// Malformed drivers and drivers targeting a missing node are skipped with
/// a warning. Returns the number of drivers applied.
pub fn animate(scene: &mut Scene, t: f32) -> usize {
    let (drivers, nodes) = scene.drivers_and_nodes_mut();
    let mut applied = 0;

    for driver in drivers {
        let Some(value) = driver.sample(t) else {
            engine_warn!(
                "nimbus::Animation",
                "Driver '{}' skipped: {} values for {} keys of width {}",
                driver.name, driver.values.len(), driver.times.len(), driver.channel.width()
            );
            continue;
        };
        let Some(node) = nodes.get_mut(driver.node as usize) else {
            engine_warn!(
                "nimbus::Animation",
                "Driver '{}' skipped: node {} out of range", driver.name, driver.node
            );
            continue;
        };

        match (driver.channel, value) {
            (Channel::Translation, ChannelValue::Vector(v)) => node.transform.position = v,
            (Channel::Scale, ChannelValue::Vector(v)) => node.transform.scale = v,
            (Channel::Rotation, ChannelValue::Rotation(q)) => node.transform.rotation = q,
            _ => continue,
        }
        applied += 1;
    }
    applied
}

#[cfg(test)]
#[path = "animation_tests.rs"]
mod tests;
