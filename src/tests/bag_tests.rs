#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::bag::Bag;
    use crate::game::BAG_SIZE;
    use crate::rng::{self, RandomSource};
    use crate::shapes::shape_count;
    use crate::tests::test_utils::ScriptedRng;

    #[test]
    fn test_new_bag_is_empty() {
        let bag = Bag::new();
        assert_eq!(bag.len(), 0);
        assert!(bag.is_empty());
        assert_eq!(bag.refill_count(), 0);
        assert!(bag.contents().is_empty());
    }

    #[test]
    fn test_first_draw_refills() {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut bag = Bag::new();

        let first = bag.draw(0, &mut rng);
        assert!(first < shape_count());
        assert_eq!(bag.refill_count(), 1);
        assert_eq!(bag.len(), BAG_SIZE);
        assert_eq!(bag.remaining(), BAG_SIZE - 1);
        assert_eq!(bag.contents()[0], first);
    }

    #[test]
    fn test_bag_hands_out_contents_in_order() {
        let mut rng = fastrand::Rng::with_seed(5);
        let mut bag = Bag::new();
        bag.refill(0, &mut rng);
        let expected = bag.contents().to_vec();

        let drawn: Vec<usize> = (0..BAG_SIZE).map(|_| bag.draw(0, &mut rng)).collect();
        assert_eq!(drawn, expected);
        assert!(bag.is_empty());
        assert_eq!(bag.refill_count(), 1);

        // The next draw starts a new bag
        bag.draw(0, &mut rng);
        assert_eq!(bag.refill_count(), 2);
        assert_eq!(bag.cursor(), 1);
    }

    #[test]
    fn test_weights_fixed_for_a_bag() {
        let mut rng = fastrand::Rng::with_seed(9);
        let mut bag = Bag::new();

        bag.draw(100, &mut rng);
        for _ in 1..BAG_SIZE {
            bag.draw(70_000, &mut rng);
        }
        // Still the bag filled at score 100
        assert_eq!(bag.refill_score(), 100);

        bag.draw(70_000, &mut rng);
        assert_eq!(bag.refill_score(), 70_000);
    }

    #[test]
    fn test_scripted_picks() {
        // Every pick lands on the first (easiest) shape
        let mut rng = ScriptedRng::constant(0.0);
        let mut bag = Bag::new();
        bag.refill(0, &mut rng);
        assert!(bag.contents().iter().all(|&i| i == 0));
    }

    #[test]
    fn test_reset_forces_refill() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut bag = Bag::new();
        bag.draw(0, &mut rng);
        bag.draw(0, &mut rng);

        bag.reset();
        assert_eq!(bag.len(), 0);
        bag.draw(0, &mut rng);
        assert_eq!(bag.refill_count(), 2);
        assert_eq!(bag.cursor(), 1);
    }

    #[test]
    fn test_early_bags_favour_easy_shapes() {
        let mut rng = fastrand::Rng::with_seed(1234);
        let mut bag = Bag::new();
        let n = shape_count();

        let mut easy = 0;
        let mut hard = 0;
        for _ in 0..50 {
            bag.refill(0, &mut rng);
            easy += bag.contents().iter().filter(|&&i| i < n / 3).count();
            hard += bag.contents().iter().filter(|&&i| i >= n - n / 3).count();
        }
        assert!(easy > hard * 2, "easy {easy} hard {hard}");
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut items: Vec<u32> = (0..20).collect();
        rng::shuffle(&mut rng, &mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<u32>>());
    }

    #[test]
    fn test_range_helpers() {
        let mut rng = fastrand::Rng::with_seed(8);
        for _ in 0..100 {
            let v = rng.range_inclusive(3, 5);
            assert!((3..=5).contains(&v));
            let f = rng.range_f32(-2.0, 2.0);
            assert!((-2.0..2.0).contains(&f));
        }
        assert_eq!(rng.range_inclusive(7, 7), 7);
        assert_eq!(rng.range_inclusive(9, 2), 9);
    }
}
