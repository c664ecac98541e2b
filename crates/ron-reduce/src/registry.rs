//! Reducer registry: filled once at startup, read-only afterwards.

use rayon::prelude::*;
use ron_core::config::ReduceConfig;
use ron_core::errors::ReduceError;
use ron_core::Uuid;
use ron_frame::Frame;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::lww::{LwwReducer, LWW_UUID};
use crate::reducer::{Reducer, ReducerMaker};
use crate::uheap::{HeapOrder, UuidHeap};

/// Collects reducer constructors before the registry is frozen.
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    makers: FxHashMap<Uuid, ReducerMaker>,
    config: ReduceConfig,
}

impl RegistryBuilder {
    pub fn new(config: ReduceConfig) -> Self {
        Self {
            makers: FxHashMap::default(),
            config,
        }
    }

    /// Register `maker` for data type `rdt`. Each type takes one reducer.
    pub fn register(
        &mut self,
        rdt: Uuid,
        maker: ReducerMaker,
    ) -> Result<&mut Self, ReduceError> {
        if self.makers.contains_key(&rdt) {
            return Err(ReduceError::AlreadyRegistered { rdt });
        }
        self.makers.insert(rdt, maker);
        Ok(self)
    }

    /// Instantiate every reducer and freeze the mapping.
    pub fn build(self) -> Registry {
        let reducers: FxHashMap<Uuid, Box<dyn Reducer>> = self
            .makers
            .into_iter()
            .map(|(rdt, make)| (rdt, make(&self.config)))
            .collect();
        info!(reducers = reducers.len(), "reducer registry built");
        Registry {
            reducers,
            config: self.config,
        }
    }
}

/// Immutable map from data type to reducer. Safe to share across threads.
pub struct Registry {
    reducers: FxHashMap<Uuid, Box<dyn Reducer>>,
    config: ReduceConfig,
}

/// Reduction result for one object of a batch.
pub type ObjectResult = (Uuid, Result<Frame, ReduceError>);

impl Registry {
    pub fn builder(config: ReduceConfig) -> RegistryBuilder {
        RegistryBuilder::new(config)
    }

    /// A registry holding the built-in reducers.
    pub fn with_defaults(config: ReduceConfig) -> Self {
        let mut builder = RegistryBuilder::new(config);
        builder.makers.insert(LWW_UUID, LwwReducer::make);
        builder.build()
    }

    pub fn get(&self, rdt: Uuid) -> Option<&dyn Reducer> {
        self.reducers.get(&rdt).map(|r| r.as_ref())
    }

    pub fn contains(&self, rdt: Uuid) -> bool {
        self.reducers.contains_key(&rdt)
    }

    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }

    pub fn config(&self) -> &ReduceConfig {
        &self.config
    }

    /// The reducer for the inputs' type; `None` when every input is empty.
    fn reducer_for(&self, inputs: &[&Frame]) -> Result<Option<&dyn Reducer>, ReduceError> {
        let Some(frame) = inputs.iter().find(|f| !f.is_empty()) else {
            return Ok(None);
        };
        let rdt = frame.rdt();
        self.get(rdt).map(Some).ok_or(ReduceError::NoReducer { rdt })
    }

    pub fn reduce(&self, a: &Frame, b: &Frame) -> Result<Frame, ReduceError> {
        match self.reducer_for(&[a, b])? {
            Some(reducer) => reducer.reduce(a, b),
            None => Ok(Frame::new()),
        }
    }

    pub fn reduce_all(&self, inputs: &[&Frame]) -> Result<Frame, ReduceError> {
        match self.reducer_for(inputs)? {
            Some(reducer) => reducer.reduce_all(inputs),
            None => Ok(Frame::new()),
        }
    }

    /// Incremental reduction with a fallback to full reduction.
    pub fn merge(&self, a: &Frame, b: &Frame) -> Result<Frame, ReduceError> {
        match self.reduce(a, b) {
            Err(err) if err.is_not_incremental() => {
                debug!(object = %a.object(), "incremental reduce refused, reducing in full");
                self.reduce_all(&[a, b])
            }
            other => other,
        }
    }

    /// Reduce a batch holding frames of many objects.
    ///
    /// Frames are grouped by object and each group is reduced in full.
    /// Results come back in object order; empty frames are dropped. Large
    /// batches are spread over the rayon pool.
    pub fn reduce_batch(&self, frames: &[Frame]) -> Vec<ObjectResult> {
        let mut heap = UuidHeap::with_capacity(HeapOrder::Ascending, frames.len());
        for (index, frame) in frames.iter().enumerate() {
            if !frame.is_empty() {
                heap.put_from(frame.object(), index);
            }
        }
        let mut groups: Vec<(Uuid, Vec<&Frame>)> = Vec::new();
        while let Some(entry) = heap.take_from() {
            match groups.last_mut() {
                Some((object, group)) if *object == entry.uuid => {
                    group.push(&frames[entry.source]);
                }
                _ => groups.push((entry.uuid, vec![&frames[entry.source]])),
            }
        }

        let parallel = frames.len() >= self.config.parallel_threshold;
        debug!(frames = frames.len(), objects = groups.len(), parallel, "reducing batch");
        let reduce = |(object, group): &(Uuid, Vec<&Frame>)| (*object, self.reduce_all(group));
        if parallel {
            groups.par_iter().map(reduce).collect()
        } else {
            groups.iter().map(reduce).collect()
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<_> = self.reducers.keys().copied().collect();
        types.sort();
        f.debug_struct("Registry")
            .field("types", &types)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_fails() {
        let mut builder = Registry::builder(ReduceConfig::default());
        builder.register(LWW_UUID, LwwReducer::make).unwrap();
        let err = builder.register(LWW_UUID, LwwReducer::make).unwrap_err();
        assert_eq!(err, ReduceError::AlreadyRegistered { rdt: LWW_UUID });
        assert_eq!(builder.build().len(), 1);
    }

    #[test]
    fn unknown_type_has_no_reducer() {
        let registry = Registry::with_defaults(ReduceConfig::default());
        let a = Frame::from("*rga#x=1;");
        assert_eq!(
            registry.reduce(&a, &a).unwrap_err(),
            ReduceError::NoReducer {
                rdt: Uuid::name_str("rga")
            }
        );
    }

    #[test]
    fn merge_falls_back_to_full_reduction() {
        let registry = Registry::with_defaults(ReduceConfig::default());
        let a = Frame::from("*lww#x@1+A:k=1;:j=1;");
        let b = Frame::from("*lww#x@2+A:k=2;");
        assert!(registry.reduce(&a, &b).unwrap_err().is_not_incremental());
        let merged = registry.merge(&a, &b).unwrap();
        assert_eq!(merged.ops().count(), 3);
    }

    #[test]
    fn batch_groups_by_object() {
        let frames: Vec<Frame> = [
            "*lww#y@1+A:k=1;",
            "*lww#x@1+A:k=1;",
            "*lww#y@2+A:k=2;",
            "",
        ]
        .into_iter()
        .map(Frame::from)
        .collect();
        let results = Registry::with_defaults(ReduceConfig::default()).reduce_batch(&frames);
        let objects: Vec<_> = results.iter().map(|(o, _)| *o).collect();
        assert_eq!(objects, [Uuid::name_str("x"), Uuid::name_str("y")]);
        let y = results[1].1.as_ref().unwrap();
        assert_eq!(y.event(), Uuid::event(2 << 54, 10 << 54));
    }
}
