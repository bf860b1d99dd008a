//! Entity culling and removal

use super::entity::TrackEntity;

/// Remove entities that are `cull_behind` or more units behind `forward`.
/// Returns how many were removed. Order of survivors is preserved.
pub fn cull_behind<E: TrackEntity>(list: &mut Vec<E>, forward: f32, cull_behind: f32) -> usize {
    let threshold = forward - cull_behind;
    let before = list.len();
    list.retain(|e| e.z() > threshold);
    before - list.len()
}

/// Remove the entity with `id`, returning it if present
pub fn remove_by_id<E: TrackEntity>(list: &mut Vec<E>, id: u32) -> Option<E> {
    let idx = list.iter().position(|e| e.id() == id)?;
    Some(list.remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Obstacle, ObstacleKind};
    use glam::Vec3;
    use proptest::prelude::*;

    fn obstacle(id: u32, z: f32) -> Obstacle {
        Obstacle { id, kind: ObstacleKind::Ring, pos: Vec3::new(0.0, 0.0, z) }
    }

    #[test]
    fn test_cull_threshold_is_inclusive() {
        let mut list = vec![obstacle(1, 4.9), obstacle(2, 5.0), obstacle(3, 5.1), obstacle(4, 30.0)];
        let removed = cull_behind(&mut list, 10.0, 5.0);
        assert_eq!(removed, 2);
        let ids: Vec<u32> = list.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn test_remove_by_id() {
        let mut list = vec![obstacle(1, 0.0), obstacle(2, 0.0), obstacle(3, 0.0)];
        assert_eq!(remove_by_id(&mut list, 2).map(|o| o.id), Some(2));
        assert!(remove_by_id(&mut list, 2).is_none());
        let ids: Vec<u32> = list.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    proptest! {
        #[test]
        fn prop_cull_keeps_only_ahead(
            zs in prop::collection::vec(-100.0f32..100.0, 0..32),
            forward in 0.0f32..50.0,
        ) {
            let mut list: Vec<Obstacle> = zs.iter().enumerate()
                .map(|(i, &z)| obstacle(i as u32 + 1, z))
                .collect();
            cull_behind(&mut list, forward, 5.0);
            for o in &list {
                prop_assert!(o.pos.z > forward - 5.0);
            }
            prop_assert!(list.windows(2).all(|w| w[0].id < w[1].id));
        }
    }
}
