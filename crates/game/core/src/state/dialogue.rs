/// Ongoing conversation with an NPC.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DialogueState {
    pub npc_id: String,
    pub current_node: String,
    /// Node ids visited, starting with the opening node.
    pub history: Vec<String>,
    /// Set once a dialogue option opened the NPC's shop.
    pub shop_open: bool,
}

impl DialogueState {
    pub fn start(npc_id: impl Into<String>, node: impl Into<String>) -> Self {
        let node = node.into();
        Self {
            npc_id: npc_id.into(),
            history: vec![node.clone()],
            current_node: node,
            shop_open: false,
        }
    }

    /// Continues the conversation at `node`.
    pub fn advance(&self, node: impl Into<String>) -> Self {
        let node = node.into();
        let mut next = self.clone();
        next.history.push(node.clone());
        next.current_node = node;
        next
    }
}
