//! Bone hierarchy

use crate::error::{AnimationError, Result};
use furrow_math::Mat4;
use serde::{Deserialize, Serialize};

/// A single bone
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    /// Bone name as authored
    pub name: String,
    /// Inverse bind pose: mesh space to bone space
    pub offset: Mat4,
    /// Parent bone index, `None` for a root
    pub parent: Option<usize>,
}

impl Bone {
    pub fn new(name: impl Into<String>, offset: Mat4, parent: Option<usize>) -> Self {
        Self {
            name: name.into(),
            offset,
            parent,
        }
    }

    /// Root bone with an identity offset
    pub fn root(name: impl Into<String>) -> Self {
        Self::new(name, Mat4::IDENTITY, None)
    }
}

/// Immutable bone hierarchy shared by every instance of a model
///
/// Bones are stored parents-first, so a single forward pass computes every
/// global transform.
#[derive(Clone, Debug)]
pub struct Skeleton {
    bones: Vec<Bone>,
    global_inverse: Mat4,
}

impl Skeleton {
    /// Build a skeleton, checking that every parent precedes its child
    pub fn new(bones: Vec<Bone>, global_inverse: Mat4) -> Result<Self> {
        for (index, bone) in bones.iter().enumerate() {
            if let Some(parent) = bone.parent {
                if parent >= index {
                    return Err(AnimationError::InvalidParent {
                        bone: index,
                        name: bone.name.clone(),
                        parent,
                    });
                }
            }
        }

        log::debug!("Skeleton built with {} bones", bones.len());
        Ok(Self {
            bones,
            global_inverse,
        })
    }

    #[inline]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    #[inline]
    pub fn bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    #[inline]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Inverse of the model root transform
    #[inline]
    pub fn global_inverse(&self) -> &Mat4 {
        &self.global_inverse
    }

    /// Index of the bone with this name
    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_bone() {
        let skeleton = Skeleton::new(
            vec![
                Bone::root("hips"),
                Bone::new("spine", Mat4::IDENTITY, Some(0)),
                Bone::new("head", Mat4::IDENTITY, Some(1)),
            ],
            Mat4::IDENTITY,
        )
        .unwrap();

        assert_eq!(skeleton.bone_count(), 3);
        assert_eq!(skeleton.find_bone("head"), Some(2));
        assert_eq!(skeleton.find_bone("tail"), None);
    }

    #[test]
    fn test_self_parent_rejected() {
        let err = Skeleton::new(
            vec![Bone::root("hips"), Bone::new("loop", Mat4::IDENTITY, Some(1))],
            Mat4::IDENTITY,
        )
        .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidParent { bone: 1, parent: 1, .. }));
    }

    #[test]
    fn test_forward_parent_rejected() {
        let err = Skeleton::new(
            vec![Bone::new("child", Mat4::IDENTITY, Some(1)), Bone::root("hips")],
            Mat4::IDENTITY,
        )
        .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidParent { bone: 0, parent: 1, .. }));
    }
}
