use crate::action::KeyAction;
use crate::event::KeyEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeymapError {
    /// The layer number is out of range
    InvalidLayer(u8),
}

/// Keymap represents the stack of layers.
///
/// A key is looked up from the highest active layer down to the default layer, transparent
/// keys fall through. The layer a key was pressed on is cached, so its release finds the
/// same action even if the active layers changed in between.
pub struct KeyMap<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize> {
    /// Layers
    layers: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER],
    /// Current state of each layer
    layer_state: [bool; NUM_LAYER],
    /// Default layer number
    default_layer: u8,
    /// Layer cache
    layer_cache: [[u8; COL]; ROW],
}

impl<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize> KeyMap<'a, ROW, COL, NUM_LAYER> {
    pub fn new(layers: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER]) -> Self {
        KeyMap {
            layers,
            layer_state: [false; NUM_LAYER],
            default_layer: 0,
            layer_cache: [[0; COL]; ROW],
        }
    }

    /// Get the default layer number
    pub fn get_default_layer(&self) -> u8 {
        self.default_layer
    }

    /// Set the default layer number
    pub fn set_default_layer(&mut self, layer_num: u8) -> Result<(), KeymapError> {
        self.check_layer(layer_num)?;
        self.default_layer = layer_num;
        Ok(())
    }

    /// Fetch the action in keymap, without touching the layer cache
    pub fn get_action_at(&self, row: usize, col: usize, layer_num: usize) -> Option<KeyAction> {
        self.layers.get(layer_num)?.get(row)?.get(col).copied()
    }

    /// Fetch the action in keymap, with layer cache
    pub fn get_action_with_layer_cache(&mut self, key_event: &KeyEvent) -> KeyAction {
        let row = key_event.pos.row as usize;
        let col = key_event.pos.col as usize;
        if row >= ROW || col >= COL {
            warn!("Key {:?} is out of the keymap", key_event.pos);
            return KeyAction::No;
        }
        if !key_event.pressed {
            // Releasing a pressed key, use cached layer and restore the cache
            let layer = self.pop_layer_from_cache(row, col);
            return self.layers[layer as usize][row][col];
        }

        // Iterate from higher layer to lower layer, the lowest checked layer is the default layer
        for (layer_idx, layer) in self.layers.iter().enumerate().rev() {
            if self.layer_state[layer_idx] || layer_idx as u8 == self.default_layer {
                let action = layer[row][col];
                if action == KeyAction::Transparent {
                    continue;
                }

                // Found a valid action in the layer, cache it
                self.layer_cache[row][col] = layer_idx as u8;
                return action;
            }

            if layer_idx as u8 == self.default_layer {
                break;
            }
        }

        KeyAction::No
    }

    /// Highest active layer
    pub fn get_activated_layer(&self) -> u8 {
        (0..NUM_LAYER)
            .rev()
            .find(|&i| self.layer_state[i] || i as u8 == self.default_layer)
            .map_or(self.default_layer, |i| i as u8)
    }

    pub fn is_layer_active(&self, layer_num: u8) -> bool {
        self.layer_state.get(layer_num as usize).copied().unwrap_or(false)
    }

    fn pop_layer_from_cache(&mut self, row: usize, col: usize) -> u8 {
        let layer = self.layer_cache[row][col];
        self.layer_cache[row][col] = self.default_layer;
        layer
    }

    fn check_layer(&self, layer_num: u8) -> Result<(), KeymapError> {
        if layer_num as usize >= NUM_LAYER {
            warn!(
                "Not a valid layer {}, keyboard supports only {} layers",
                layer_num, NUM_LAYER
            );
            return Err(KeymapError::InvalidLayer(layer_num));
        }
        Ok(())
    }

    /// Activate given layer
    pub fn activate_layer(&mut self, layer_num: u8) -> Result<(), KeymapError> {
        self.check_layer(layer_num)?;
        debug!("Layer {} on", layer_num);
        self.layer_state[layer_num as usize] = true;
        Ok(())
    }

    /// Deactivate given layer
    pub fn deactivate_layer(&mut self, layer_num: u8) -> Result<(), KeymapError> {
        self.check_layer(layer_num)?;
        debug!("Layer {} off", layer_num);
        self.layer_state[layer_num as usize] = false;
        Ok(())
    }

    /// Toggle given layer
    pub fn toggle_layer(&mut self, layer_num: u8) -> Result<(), KeymapError> {
        self.check_layer(layer_num)?;
        self.layer_state[layer_num as usize] = !self.layer_state[layer_num as usize];
        Ok(())
    }
}
