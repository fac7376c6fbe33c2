#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::Theme;
    use crate::game::{MAX_PARTICLES, PARTICLE_LIFE_MAX, PARTICLE_LIFE_MIN};
    use crate::particles::{ParticlePool, Spread};

    #[test]
    fn test_spawn_is_capped_by_capacity() {
        let mut rng = fastrand::Rng::with_seed(4);
        let mut pool = ParticlePool::with_capacity(10);

        assert_eq!(pool.spawn(100.0, 100.0, Theme::new(1), 15, &mut rng), 10);
        assert_eq!(pool.alive_count(), 10);
        assert_eq!(pool.spawn(100.0, 100.0, Theme::new(1), 5, &mut rng), 0);
        assert_eq!(ParticlePool::default().capacity(), MAX_PARTICLES);
    }

    #[test]
    fn test_spawned_particles_are_in_range() {
        let mut rng = fastrand::Rng::with_seed(12);
        let mut pool = ParticlePool::with_capacity(50);
        let spread = Spread::default();
        pool.spawn(200.0, 300.0, Theme::new(3), 50, &mut rng);

        for p in pool.iter() {
            assert!((194.0..=206.0).contains(&p.x));
            assert!((294.0..=306.0).contains(&p.y));
            assert!((PARTICLE_LIFE_MIN..PARTICLE_LIFE_MAX).contains(&p.life));
            assert!((spread.size_min..spread.size_max).contains(&p.size));
            assert_eq!(p.theme, Theme::new(3));
            assert!((p.life_fraction() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut rng = fastrand::Rng::with_seed(99);
        let mut pool = ParticlePool::with_capacity(20);
        pool.spawn(0.0, 0.0, Theme::new(0), 20, &mut rng);
        let before: Vec<f32> = pool.iter().map(|p| p.vy).collect();

        pool.tick(0.01);
        let after: Vec<f32> = pool.iter().map(|p| p.vy).collect();
        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(&after) {
            assert!(a > b, "vy {b} -> {a}");
        }
    }

    #[test]
    fn test_expired_slots_are_reused() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut pool = ParticlePool::with_capacity(4);
        pool.spawn(0.0, 0.0, Theme::new(0), 4, &mut rng);

        pool.tick(1.0);
        assert_eq!(pool.alive_count(), 0);
        assert_eq!(pool.iter().count(), 0);

        assert_eq!(pool.spawn(0.0, 0.0, Theme::new(0), 4, &mut rng), 4);
        pool.clear();
        assert_eq!(pool.alive_count(), 0);
        assert_eq!(pool.capacity(), 4);
    }
}
