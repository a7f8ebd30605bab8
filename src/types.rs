/// Node identifier. Signed so synthetic sentinels (the trie's NIL node) can sit below zero.
pub type NodeId = isize;
pub type DestId = NodeId;

pub type Edge = (NodeId, DestId);
pub type EdgeList = Vec<Edge>;
