/// A 3D vector used for position, velocity and acceleration.
///
/// The simulation is planar: every vector that reaches an [`Agent`](crate::Agent)
/// has `z == 0`. The third component exists so renderers working in 3D scene
/// space can consume positions without conversion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A vector in the simulation plane.
    pub const fn planar(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub const fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn magnitude(&self) -> f32 {
        sqrt(self.magnitude_squared())
    }

    /// Unit vector in the same direction, or the zero vector when `self` has
    /// no length. Never produces NaN for finite input.
    ///
    /// Components are scaled by the largest one before squaring, so very large
    /// or very small finite vectors still normalize instead of overflowing to
    /// infinity or underflowing to zero.
    pub fn normalize(&self) -> Self {
        let scale = self.x.abs().max(self.y.abs()).max(self.z.abs());
        if !(scale > 0.0 && scale.is_finite()) {
            return Self::zero();
        }

        let scaled = *self / scale;
        let mag = scaled.magnitude();
        Self {
            x: scaled.x / mag,
            y: scaled.y / mag,
            z: scaled.z / mag,
        }
    }

    pub fn distance_squared(&self, other: &Vec3) -> f32 {
        (*self - *other).magnitude_squared()
    }

    pub fn distance(&self, other: &Vec3) -> f32 {
        sqrt(self.distance_squared(other))
    }

    /// Projects onto the simulation plane.
    pub fn flatten(&self) -> Self {
        Self::planar(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl core::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl core::ops::Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl core::ops::Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vec3 {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl core::ops::Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl core::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl core::ops::SubAssign for Vec3 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

pub(crate) fn sqrt(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrtf(value)
    }
}

#[cfg(feature = "rand")]
pub(crate) fn sin_cos(angle: f32) -> (f32, f32) {
    #[cfg(feature = "std")]
    {
        angle.sin_cos()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sincosf(angle)
    }
}
