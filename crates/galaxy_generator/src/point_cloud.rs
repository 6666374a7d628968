use bevy::math::Vec3;

use crate::{GalaxyColor, GalaxyError};

/// Flat position and color buffers, three floats per particle, index aligned.
///
/// Particle `i` lives at `[3i, 3i + 3)` in both buffers. The cloud owns its buffers;
/// replacing a cloud means dropping the old one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GalaxyPointCloud {
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl GalaxyPointCloud {
    /// Zero-filled buffers for `count` particles. Allocation failure is returned, not aborted on.
    pub(crate) fn zeroed(count: usize) -> Result<Self, GalaxyError> {
        Ok(Self {
            positions: zeroed_buffer(count)?,
            colors: zeroed_buffer(count)?,
        })
    }

    pub(crate) fn buffers_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.positions, &mut self.colors)
    }

    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    pub fn color(&self, index: usize) -> GalaxyColor {
        let c = &self.colors[index * 3..index * 3 + 3];
        GalaxyColor::rgb(c[0], c[1], c[2])
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Vec3, GalaxyColor)> + '_ {
        self.positions
            .chunks_exact(3)
            .zip(self.colors.chunks_exact(3))
            .map(|(p, c)| (Vec3::from_slice(p), GalaxyColor::rgb(c[0], c[1], c[2])))
    }

    /// Axis aligned extent of all positions, `None` for an empty cloud.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.iter().map(|(p, _)| p).fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((min, max)) => Some((min.min(p), max.max(p))),
        })
    }

    /// Raw native-endian view of the position buffer, ready for a vertex buffer upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.positions.as_slice())
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.colors.as_slice())
    }

    /// Hands both buffers to the consumer, `(positions, colors)`.
    pub fn into_buffers(self) -> (Vec<f32>, Vec<f32>) {
        (self.positions, self.colors)
    }
}

fn zeroed_buffer(count: usize) -> Result<Vec<f32>, GalaxyError> {
    let len = count
        .checked_mul(3)
        .ok_or_else(|| GalaxyError::invalid("count", format!("{count} particles overflow the buffer length")))?;
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|source| GalaxyError::AllocationFailure {
            particles: count,
            source,
        })?;
    buffer.resize(len, 0.0);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cloud_is_well_shaped() {
        let cloud = GalaxyPointCloud::zeroed(0).unwrap();
        assert!(cloud.is_empty());
        assert_eq!(cloud.len(), 0);
        assert_eq!(cloud.bounds(), None);
        let (positions, colors) = cloud.into_buffers();
        assert!(positions.is_empty() && colors.is_empty());
    }

    #[test]
    fn accessors_follow_triple_layout() {
        let mut cloud = GalaxyPointCloud::zeroed(2).unwrap();
        {
            let (positions, colors) = cloud.buffers_mut();
            positions.copy_from_slice(&[1.0, 2.0, 3.0, -1.0, 0.5, 4.0]);
            colors.copy_from_slice(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        }

        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.position(1), Vec3::new(-1.0, 0.5, 4.0));
        assert_eq!(cloud.color(0), GalaxyColor::rgb(0.1, 0.2, 0.3));
        assert_eq!(cloud.iter().len(), 2);
        assert_eq!(cloud.position_bytes().len(), 6 * 4);
        assert_eq!(&cloud.color_bytes()[12..16], &0.4f32.to_ne_bytes());
        assert_eq!(
            cloud.bounds(),
            Some((Vec3::new(-1.0, 0.5, 3.0), Vec3::new(1.0, 2.0, 4.0)))
        );
    }

    #[test]
    fn absurd_sizes_fail_without_aborting() {
        let err = GalaxyPointCloud::zeroed(usize::MAX / 4).unwrap_err();
        assert!(matches!(err, GalaxyError::AllocationFailure { .. }));

        let err = GalaxyPointCloud::zeroed(usize::MAX / 2).unwrap_err();
        assert!(err.is_invalid_parameter());
    }
}
