//! Snake (boustrophedon) traversal over a fixed list of buckets.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Walk state: the bucket the next item goes into and which way we are heading.
///
/// Over 3 buckets the visited sequence is `0,1,2,2,1,0,0,1,2,...`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SnakeWalk {
    pub index: usize,
    pub direction: Direction,
    len: usize,
}

impl SnakeWalk {
    /// Start at bucket 0 heading forward. `len` must be non-zero.
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            direction: Direction::Forward,
            len,
        }
    }

    /// State after placing one item at `self.index`.
    pub fn step(self) -> Self {
        match self.direction {
            Direction::Forward if self.index + 1 >= self.len => Self {
                direction: Direction::Backward,
                ..self
            },
            Direction::Forward => Self {
                index: self.index + 1,
                ..self
            },
            Direction::Backward if self.index == 0 => Self {
                direction: Direction::Forward,
                ..self
            },
            Direction::Backward => Self {
                index: self.index - 1,
                ..self
            },
        }
    }
}

/// Bucket index for each of `count` items dealt over `buckets` buckets.
/// Empty when there are no buckets.
pub fn snake_order(count: usize, buckets: usize) -> Vec<usize> {
    if buckets == 0 {
        return Vec::new();
    }
    (0..count)
        .scan(SnakeWalk::new(buckets), |walk, _| {
            let index = walk.index;
            *walk = walk.step();
            Some(index)
        })
        .collect()
}

/// Deal `items` into `buckets` buckets in snake order.
pub fn snake_distribute<T>(items: impl IntoIterator<Item = T>, buckets: usize) -> Vec<Vec<T>> {
    let mut out: Vec<Vec<T>> = (0..buckets).map(|_| Vec::new()).collect();
    if buckets == 0 {
        return out;
    }
    items
        .into_iter()
        .fold(SnakeWalk::new(buckets), |walk, item| {
            out[walk.index].push(item);
            walk.step()
        });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_buckets_reverse_at_the_ends() {
        assert_eq!(snake_order(6, 3), vec![0, 1, 2, 2, 1, 0]);
        assert_eq!(snake_order(9, 3), vec![0, 1, 2, 2, 1, 0, 0, 1, 2]);
    }

    #[test]
    fn single_bucket_takes_everything() {
        assert_eq!(snake_order(4, 1), vec![0, 0, 0, 0]);
    }

    #[test]
    fn no_buckets_no_order() {
        assert!(snake_order(5, 0).is_empty());
        assert!(snake_distribute(vec![1, 2, 3], 0).is_empty());
    }

    #[test]
    fn distribute_two_courts_of_four() {
        let dealt = snake_distribute(vec![8, 7, 6, 5, 4, 3, 2, 1], 2);
        assert_eq!(dealt, vec![vec![8, 5, 4, 1], vec![7, 6, 3, 2]]);
    }

    #[test]
    fn step_turns_around() {
        let w = SnakeWalk::new(2).step();
        assert_eq!((w.index, w.direction), (1, Direction::Forward));
        let w = w.step();
        assert_eq!((w.index, w.direction), (1, Direction::Backward));
        let w = w.step();
        assert_eq!((w.index, w.direction), (0, Direction::Backward));
        let w = w.step();
        assert_eq!((w.index, w.direction), (0, Direction::Forward));
    }
}
