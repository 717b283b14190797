use std::hash::Hash;
use std::time::Duration;

use indexmap::{IndexMap, IndexSet};

/// Cubic ease-in-out over `t` in `[0, 1]`.
#[must_use]
pub fn cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Keys partitioned by a data join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDiff<K> {
    pub entered: Vec<K>,
    pub retained: Vec<K>,
    pub exited: Vec<K>,
}

impl<K> KeyDiff<K> {
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

/// Joins `current` keys against `next` keys.
///
/// `entered` and `retained` follow `next` order, `exited` follows `current`.
#[must_use]
pub fn diff_keys<K, C, N>(current: C, next: N) -> KeyDiff<K>
where
    K: Hash + Eq + Clone,
    C: IntoIterator<Item = K>,
    N: IntoIterator<Item = K>,
{
    let current: IndexSet<K> = current.into_iter().collect();
    let next: IndexSet<K> = next.into_iter().collect();

    let mut diff = KeyDiff {
        entered: Vec::new(),
        retained: Vec::new(),
        exited: Vec::new(),
    };
    for key in &next {
        if current.contains(key) {
            diff.retained.push(key.clone());
        } else {
            diff.entered.push(key.clone());
        }
    }
    diff.exited = current
        .into_iter()
        .filter(|key| !next.contains(key))
        .collect();
    diff
}

/// Values a transition can blend between.
pub trait Interpolate: Clone + PartialEq {
    #[must_use]
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for (f64, f64) {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        (self.0.interpolate(&to.0, t), self.1.interpolate(&to.1, t))
    }
}

/// Point paths blend vertex by vertex. When the target has more vertices the
/// source is padded with its last vertex, so new segments grow out of the old
/// end point; surplus source vertices are dropped.
impl Interpolate for Vec<(f64, f64)> {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        let Some(&pad) = self.last() else {
            return to.clone();
        };
        to.iter()
            .enumerate()
            .map(|(index, target)| self.get(index).unwrap_or(&pad).interpolate(target, t))
            .collect()
    }
}

/// One timed blend from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<V> {
    from: V,
    to: V,
    elapsed: Duration,
    duration: Duration,
}

impl<V: Interpolate> Tween<V> {
    #[must_use]
    pub fn new(from: V, to: V, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// A tween that already sits at `value`.
    #[must_use]
    pub fn settled(value: V) -> Self {
        Self {
            from: value.clone(),
            to: value,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn target(&self) -> &V {
        &self.to
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[must_use]
    pub fn value(&self) -> V {
        if self.is_finished() {
            return self.to.clone();
        }
        self.from.interpolate(&self.to, cubic_in_out(self.progress()))
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// Restarts towards `to` from the current sampled value.
    pub fn retarget(&mut self, to: V, duration: Duration) {
        *self = Self::new(self.value(), to, duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkPhase {
    Active,
    /// Animating out; removed once its tween completes.
    Exiting,
}

#[derive(Debug, Clone, PartialEq)]
struct Mark<V> {
    tween: Tween<V>,
    phase: MarkPhase,
}

/// How a mark whose key left the data set goes away.
#[derive(Debug, Clone, PartialEq)]
pub enum ExitAction<V> {
    Remove,
    AnimateTo(V),
}

/// Keyed marks reconciled against successive target sets.
///
/// A reconcile never queues behind running tweens: every retained or revived
/// key restarts from its currently displayed value.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedMarks<K: Hash + Eq, V> {
    marks: IndexMap<K, Mark<V>>,
    duration: Duration,
}

impl<K, V> AnimatedMarks<K, V>
where
    K: Hash + Eq + Clone,
    V: Interpolate,
{
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            marks: IndexMap::new(),
            duration,
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Joins `targets` against the current marks.
    ///
    /// `enter` gives the starting value of a new key (return the target itself
    /// to appear in place). `exit` decides what happens to a key that is no
    /// longer present. Keys already exiting are left alone.
    pub fn reconcile<E, X>(&mut self, targets: Vec<(K, V)>, enter: E, exit: X) -> KeyDiff<K>
    where
        E: Fn(&K, &V) -> V,
        X: Fn(&K, &V) -> ExitAction<V>,
    {
        let active_keys: Vec<K> = self
            .marks
            .iter()
            .filter(|(_, mark)| mark.phase == MarkPhase::Active)
            .map(|(key, _)| key.clone())
            .collect();
        let diff = diff_keys(active_keys, targets.iter().map(|(key, _)| key.clone()));

        for key in &diff.exited {
            let Some(mark) = self.marks.get_mut(key) else {
                continue;
            };
            match exit(key, mark.tween.target()) {
                ExitAction::Remove => {
                    self.marks.shift_remove(key);
                }
                ExitAction::AnimateTo(value) => {
                    mark.tween.retarget(value, self.duration);
                    mark.phase = MarkPhase::Exiting;
                }
            }
        }

        for (key, target) in targets {
            match self.marks.get_mut(&key) {
                Some(mark) => {
                    let unchanged = mark.phase == MarkPhase::Active && *mark.tween.target() == target;
                    if !unchanged {
                        mark.tween.retarget(target, self.duration);
                    }
                    mark.phase = MarkPhase::Active;
                }
                None => {
                    let start = enter(&key, &target);
                    self.marks.insert(
                        key,
                        Mark {
                            tween: Tween::new(start, target, self.duration),
                            phase: MarkPhase::Active,
                        },
                    );
                }
            }
        }
        diff
    }

    /// Advances every tween and drops exiting marks that finished.
    pub fn advance(&mut self, dt: Duration) {
        for mark in self.marks.values_mut() {
            mark.tween.advance(dt);
        }
        self.marks
            .retain(|_, mark| !(mark.phase == MarkPhase::Exiting && mark.tween.is_finished()));
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.marks.values().any(|mark| !mark.tween.is_finished())
    }

    #[must_use]
    pub fn value(&self, key: &K) -> Option<V> {
        self.marks.get(key).map(|mark| mark.tween.value())
    }

    #[must_use]
    pub fn target(&self, key: &K) -> Option<&V> {
        self.marks.get(key).map(|mark| mark.tween.target())
    }

    #[must_use]
    pub fn phase(&self, key: &K) -> Option<MarkPhase> {
        self.marks.get(key).map(|mark| mark.phase)
    }

    /// Current sampled values in insertion order, exiting marks included.
    pub fn iter(&self) -> impl Iterator<Item = (&K, V, MarkPhase)> + '_ {
        self.marks
            .iter()
            .map(|(key, mark)| (key, mark.tween.value(), mark.phase))
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_is_symmetric_around_midpoint() {
        assert_eq!(cubic_in_out(0.0), 0.0);
        assert_eq!(cubic_in_out(0.5), 0.5);
        assert_eq!(cubic_in_out(1.0), 1.0);
        let a = cubic_in_out(0.25);
        let b = cubic_in_out(0.75);
        assert!((a + b - 1.0).abs() < 1e-12);
    }

    #[test]
    fn path_growth_starts_from_previous_end() {
        let from = vec![(0.0, 0.0), (10.0, 10.0)];
        let to = vec![(0.0, 0.0), (10.0, 20.0), (20.0, 30.0)];
        let halfway = from.interpolate(&to, 0.5);
        assert_eq!(halfway, vec![(0.0, 0.0), (10.0, 15.0), (15.0, 20.0)]);
    }
}
