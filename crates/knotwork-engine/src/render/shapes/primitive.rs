use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    create_quad_pipeline, create_viewport_ubo, viewport_uniform_entry, InstanceBuffer, UnitQuad,
    ViewportUniform,
};

/// Extra coverage around every shape for the antialiased edge.
const AA_MARGIN: f32 = 1.0;

const KIND_SEGMENT: f32 = 0.0;
const KIND_CIRCLE: f32 = 1.0;
const KIND_RECT: f32 = 2.0;

/// Renderer for `DrawCmd::{Line, Circle, Rect}`.
///
/// All primitives go into one instance buffer and one draw call, so overlap
/// follows `DrawList` order exactly. The fragment shader evaluates a signed
/// distance per shape kind (capsule, disc, box) for antialiased edges.
#[derive(Default)]
pub struct PrimitiveRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    quad: Option<UnitQuad>,
    instances: InstanceBuffer,
}

impl PrimitiveRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        let instances = build_instances(draw_list);
        if instances.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        if self.quad.is_none() {
            self.quad = Some(UnitQuad::new(ctx.device, "knotwork primitive"));
        }

        if let Some(ubo) = &self.viewport_ubo {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));
        }
        self.instances.upload(ctx, "knotwork primitive instance vbo", &instances);

        let (Some(pipeline), Some(bind_group), Some(quad), Some(instance_vbo)) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.quad.as_ref(),
            self.instances.buffer(),
        ) else {
            return;
        };

        let mut rpass = target.begin_overlay_pass("knotwork primitive pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..instances.len() as u32);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("knotwork primitive bgl"),
            entries: &[viewport_uniform_entry(0)],
        });

        let pipeline = create_quad_pipeline(
            ctx,
            "knotwork primitive",
            include_str!("shaders/primitive.wgsl"),
            &bgl,
            PrimitiveInstance::layout(),
        );

        let viewport_ubo = create_viewport_ubo(ctx.device, "knotwork primitive viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("knotwork primitive bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        log::debug!("primitive pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }
}

/// Converts the non-text commands of `draw_list` to GPU instances, in order.
fn build_instances(draw_list: &DrawList) -> Vec<PrimitiveInstance> {
    draw_list
        .primitives()
        .filter_map(|cmd| match cmd {
            DrawCmd::Line(l) => {
                let half = l.width * 0.5 + AA_MARGIN;
                Some(PrimitiveInstance {
                    bounds: [
                        l.from.x.min(l.to.x) - half,
                        l.from.y.min(l.to.y) - half,
                        l.from.x.max(l.to.x) + half,
                        l.from.y.max(l.to.y) + half,
                    ],
                    p0: [l.from.x, l.from.y],
                    p1: [l.to.x, l.to.y],
                    params: [l.width * 0.5, KIND_SEGMENT],
                    color: l.color.to_array(),
                })
            }
            DrawCmd::Circle(c) => {
                let r = c.radius + AA_MARGIN;
                Some(PrimitiveInstance {
                    bounds: [c.center.x - r, c.center.y - r, c.center.x + r, c.center.y + r],
                    p0: [c.center.x, c.center.y],
                    p1: [c.center.x, c.center.y],
                    params: [c.radius, KIND_CIRCLE],
                    color: c.color.to_array(),
                })
            }
            DrawCmd::Rect(r) => {
                let (min, max) = (r.rect.min(), r.rect.max());
                Some(PrimitiveInstance {
                    bounds: [min.x - AA_MARGIN, min.y - AA_MARGIN, max.x + AA_MARGIN, max.y + AA_MARGIN],
                    p0: [min.x, min.y],
                    p1: [max.x, max.y],
                    params: [0.0, KIND_RECT],
                    color: r.color.to_array(),
                })
            }
            DrawCmd::Text(_) => None,
        })
        .collect()
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (56 bytes):
///
///  offset  0  bounds  [f32; 4]   loc 1  (min.xy, max.xy of the covered quad)
///  offset 16  p0      [f32; 2]   loc 2  (segment start / center / rect min)
///  offset 24  p1      [f32; 2]   loc 3  (segment end / center / rect max)
///  offset 32  params  [f32; 2]   loc 4  (.x = half width or radius, .y = kind)
///  offset 40  color   [f32; 4]   loc 5  (premultiplied)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct PrimitiveInstance {
    bounds: [f32; 4],
    p0: [f32; 2],
    p1: [f32; 2],
    params: [f32; 2],
    color: [f32; 4],
}

impl PrimitiveInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x4, // bounds
        2 => Float32x2, // p0
        3 => Float32x2, // p1
        4 => Float32x2, // params
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PrimitiveInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;
    use crate::text::FontId;

    #[test]
    fn instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<PrimitiveInstance>(), 56);
    }

    #[test]
    fn instances_keep_list_order_and_skip_text() {
        let mut list = DrawList::new();
        list.push_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        list.push_text("x", FontId(0), 12.0, Color::WHITE, Vec2::zero());
        list.push_line(Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0), 3.0, Color::WHITE);
        list.push_circle(Vec2::new(4.0, 4.0), 3.0, Color::WHITE);

        let kinds: Vec<f32> = build_instances(&list).iter().map(|i| i.params[1]).collect();
        assert_eq!(kinds, vec![KIND_RECT, KIND_SEGMENT, KIND_CIRCLE]);
    }

    #[test]
    fn segment_bounds_cover_stroke_and_margin() {
        let mut list = DrawList::new();
        list.push_line(Vec2::new(10.0, 20.0), Vec2::new(30.0, 5.0), 4.0, Color::WHITE);

        let inst = build_instances(&list)[0];
        assert_eq!(inst.bounds, [7.0, 2.0, 33.0, 23.0]);
        assert_eq!(inst.params[0], 2.0);
    }

    #[test]
    fn circle_bounds_are_square_around_center() {
        let mut list = DrawList::new();
        list.push_circle(Vec2::new(50.0, 50.0), 3.0, Color::WHITE);

        let inst = build_instances(&list)[0];
        assert_eq!(inst.bounds, [46.0, 46.0, 54.0, 54.0]);
        assert_eq!(inst.p0, [50.0, 50.0]);
    }
}
