/// One candidate returned by a scene-retrieval query: the identifier of a
/// database entry and its error score, where lower is a better match.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalMatch {
    pub id: String,
    pub error: f64,
}

/// The seam to an external scene-recognition/retrieval engine holding a
/// database of map tile images.
///
/// The engine identifies database entries by the string they were added
/// under, typically the path of the training image. The navigation core
/// narrows queries by supplying a `filter` built from tile-grid adjacency,
/// which improves both precision and query time over an unrestricted
/// search. Training and loading of the underlying model are out of scope.
pub trait SceneRetrieval<F> {
    /// Returns up to `limit` candidates matching `image`, restricted to
    /// database entries for which `filter` returns true, ranked best
    /// first. An empty vector means no candidate passed the filter.
    fn query(&self, image: &F, filter: &dyn Fn(&str) -> bool, limit: usize)
        -> Vec<RetrievalMatch>;
}
