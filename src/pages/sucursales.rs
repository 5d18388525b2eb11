//! Branch management: paginated list, create/edit modal, toggle and delete.

use gloo_console::error;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, InputEvent};
use yew::prelude::*;

use crate::api::SucursalesApi;
use crate::models::{
    format_date, validate_sucursal, Pagination, SortOrder, Sucursal, SucursalFilters,
    SucursalPayload,
};
use crate::{
    icon_edit, icon_plus, icon_search, icon_toggle, icon_trash, notice_banner, page_shell, Notice,
    PaginationControls,
};

fn empty_pagination() -> Pagination {
    Pagination {
        total: 0,
        page: 1,
        limit: 10,
        total_pages: 0,
    }
}

#[derive(Properties, PartialEq)]
struct SucursalFormProps {
    initial: Option<Sucursal>,
    saving: bool,
    on_submit: Callback<SucursalPayload>,
    on_cancel: Callback<()>,
}

#[function_component(SucursalFormModal)]
fn sucursal_form_modal(props: &SucursalFormProps) -> Html {
    let name = use_state(|| {
        props
            .initial
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_default()
    });
    let code = use_state(|| {
        props
            .initial
            .as_ref()
            .and_then(|s| s.code.clone())
            .unwrap_or_default()
    });
    let address = use_state(|| {
        props
            .initial
            .as_ref()
            .and_then(|s| s.address.clone())
            .unwrap_or_default()
    });
    let phone = use_state(|| {
        props
            .initial
            .as_ref()
            .and_then(|s| s.phone.clone())
            .unwrap_or_default()
    });
    let is_active = use_state(|| props.initial.as_ref().map(|s| s.is_active).unwrap_or(true));
    let form_error = use_state(|| None::<String>);

    let is_edit = props.initial.is_some();

    let on_save = {
        let name = name.clone();
        let code = code.clone();
        let address = address.clone();
        let phone = phone.clone();
        let is_active = is_active.clone();
        let form_error = form_error.clone();
        let on_submit = props.on_submit.clone();

        Callback::from(move |_| {
            if let Some(message) = validate_sucursal(&name, &code, &phone) {
                form_error.set(Some(message));
                return;
            }
            form_error.set(None);

            let trimmed = |value: &str| {
                let value = value.trim();
                if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            };
            on_submit.emit(SucursalPayload {
                name: name.trim().to_string(),
                code: trimmed(&code),
                address: trimmed(&address),
                phone: trimmed(&phone),
                is_active: *is_active,
            });
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };

    let text_input = |label: &'static str,
                      placeholder: &'static str,
                      handle: &UseStateHandle<String>|
     -> Html {
        let handle = handle.clone();
        let value = (*handle).clone();
        html! {
            <div class="space-y-1">
                <label class="text-[12px] font-bold text-muted-foreground">{ label }</label>
                <input type="text" placeholder={placeholder} value={value} oninput={Callback::from(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    handle.set(input.value());
                })} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none" />
            </div>
        }
    };

    html! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50 p-4">
            <div class="bg-white rounded-[16px] shadow-xl w-full max-w-lg p-6">
                <h3 class="text-lg font-bold text-[#173E63] mb-4">
                    { if is_edit { "Editar Sucursal" } else { "Nueva Sucursal" } }
                </h3>

                <div class="space-y-3">
                    { text_input("Nombre", "Nombre de la sucursal...", &name) }
                    <div class="grid grid-cols-2 gap-3">
                        { text_input("Código", "LC01", &code) }
                        { text_input("Teléfono", "987654321", &phone) }
                    </div>
                    { text_input("Dirección", "Av. ...", &address) }

                    <label class="flex items-center gap-2 text-sm text-foreground">
                        <input type="checkbox" checked={*is_active} onchange={{
                            let is_active = is_active.clone();
                            Callback::from(move |e: Event| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                is_active.set(input.checked());
                            })
                        }} />
                        {"Sucursal activa"}
                    </label>

                    {
                        if let Some(msg) = &*form_error {
                            html! { <p class="text-sm text-red-500">{ msg.clone() }</p> }
                        } else {
                            html! {}
                        }
                    }
                </div>

                <div class="flex justify-end gap-3 mt-6">
                    <button onclick={on_cancel} disabled={props.saving}
                        class="px-4 py-2 text-sm rounded-[10px] text-slate-500 hover:bg-slate-100">
                        {"Cancelar"}
                    </button>
                    <button onclick={on_save} disabled={props.saving}
                        class="px-4 py-2 text-sm rounded-[10px] bg-[#173E63] text-white font-bold disabled:opacity-60">
                        { if props.saving { "Guardando..." } else if is_edit { "Actualizar Sucursal" } else { "Crear Sucursal" } }
                    </button>
                </div>
            </div>
        </div>
    }
}

#[function_component(SucursalesPage)]
pub fn sucursales_page() -> Html {
    let sucursales = use_state(Vec::<Sucursal>::new);
    let pagination = use_state(empty_pagination);
    let filters = use_state(SucursalFilters::default);
    let loading = use_state(|| true);
    let notice = use_state(|| None::<Notice>);
    let refresh = use_state(|| 0u32);

    let show_form = use_state(|| false);
    let editing = use_state(|| None::<Sucursal>);
    let delete_target = use_state(|| None::<Sucursal>);
    let saving = use_state(|| false);

    {
        let sucursales = sucursales.clone();
        let pagination = pagination.clone();
        let loading = loading.clone();
        let notice = notice.clone();

        use_effect_with_deps(
            move |(filters, _refresh): &(SucursalFilters, u32)| {
                let filters = filters.clone();
                loading.set(true);
                spawn_local(async move {
                    match SucursalesApi::get_all(&filters).await {
                        Ok(resp) => {
                            sucursales.set(resp.data);
                            pagination.set(Pagination {
                                total: resp.total,
                                page: resp.page,
                                limit: resp.limit,
                                total_pages: resp.total_pages,
                            });
                        }
                        Err(err) => {
                            error!(format!("Error al cargar sucursales: {}", err));
                            notice.set(Some(Notice::error("No se pudo cargar las sucursales")));
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            ((*filters).clone(), *refresh),
        );
    }

    let on_page_change = {
        let filters = filters.clone();
        Callback::from(move |page: u32| {
            filters.set((*filters).clone().with_page(page));
        })
    };

    let on_search = {
        let filters = filters.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            filters.set((*filters).clone().with_name(&input.value()));
        })
    };

    let on_estado_change = {
        let filters = filters.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = match select.value().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            };
            filters.set((*filters).clone().with_is_active(value));
        })
    };

    let on_sort_by_change = {
        let filters = filters.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            let by = if value.is_empty() { None } else { Some(value) };
            let current = (*filters).clone();
            let order = current.sort_order;
            filters.set(current.with_sort(by, order));
        })
    };

    let on_sort_order_change = {
        let filters = filters.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let current = (*filters).clone();
            let by = current.sort_by.clone();
            filters.set(current.with_sort(by, SortOrder::parse(&select.value())));
        })
    };

    let on_clear_filters = {
        let filters = filters.clone();
        Callback::from(move |_| filters.set(SucursalFilters::default()))
    };

    let on_new = {
        let show_form = show_form.clone();
        let editing = editing.clone();
        let notice = notice.clone();
        Callback::from(move |_| {
            editing.set(None);
            notice.set(None);
            show_form.set(true);
        })
    };

    let on_cancel_form = {
        let show_form = show_form.clone();
        Callback::from(move |_| show_form.set(false))
    };

    let on_submit_form = {
        let editing = editing.clone();
        let show_form = show_form.clone();
        let saving = saving.clone();
        let notice = notice.clone();
        let refresh = refresh.clone();

        Callback::from(move |payload: SucursalPayload| {
            let editing_id = editing.as_ref().map(|s| s.id);
            let show_form = show_form.clone();
            let saving = saving.clone();
            let notice = notice.clone();
            let refresh = refresh.clone();

            saving.set(true);
            spawn_local(async move {
                let result = match editing_id {
                    Some(id) => SucursalesApi::update(id, &payload).await,
                    None => SucursalesApi::create(&payload).await,
                };
                match result {
                    Ok(_) => {
                        notice.set(Some(Notice::success(if editing_id.is_some() {
                            "Sucursal actualizada correctamente"
                        } else {
                            "Sucursal creada correctamente"
                        })));
                        show_form.set(false);
                        refresh.set(*refresh + 1);
                    }
                    Err(err) => {
                        error!(format!("Error al guardar sucursal: {}", err));
                        notice.set(Some(Notice::error("No se pudo guardar la sucursal")));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_toggle = {
        let saving = saving.clone();
        let notice = notice.clone();
        let refresh = refresh.clone();
        Callback::from(move |sucursal: Sucursal| {
            let saving = saving.clone();
            let notice = notice.clone();
            let refresh = refresh.clone();
            saving.set(true);
            spawn_local(async move {
                match SucursalesApi::toggle_status(sucursal.id).await {
                    Ok(updated) => {
                        notice.set(Some(Notice::success(if updated.is_active {
                            "Sucursal activada correctamente"
                        } else {
                            "Sucursal desactivada correctamente"
                        })));
                        refresh.set(*refresh + 1);
                    }
                    Err(err) => {
                        error!(format!("Error al cambiar estado de sucursal: {}", err));
                        notice.set(Some(Notice::error(
                            "No se pudo cambiar el estado de la sucursal",
                        )));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_confirm_delete = {
        let delete_target = delete_target.clone();
        let saving = saving.clone();
        let notice = notice.clone();
        let refresh = refresh.clone();
        Callback::from(move |_| {
            let Some(target) = (*delete_target).clone() else {
                return;
            };
            let delete_target = delete_target.clone();
            let saving = saving.clone();
            let notice = notice.clone();
            let refresh = refresh.clone();
            saving.set(true);
            spawn_local(async move {
                match SucursalesApi::delete(target.id).await {
                    Ok(()) => {
                        notice.set(Some(Notice::success("Sucursal eliminada correctamente")));
                        delete_target.set(None);
                        refresh.set(*refresh + 1);
                    }
                    Err(err) => {
                        error!(format!("Error al eliminar sucursal: {}", err));
                        notice.set(Some(Notice::error("No se pudo eliminar la sucursal")));
                    }
                }
                saving.set(false);
            });
        })
    };

    let estado_value = match filters.is_active {
        Some(true) => "true",
        Some(false) => "false",
        None => "",
    };
    let sort_by_value = filters.sort_by.clone().unwrap_or_default();
    let sort_order_value = filters.sort_order.map(|o| o.as_str()).unwrap_or("");

    html! {
        { page_shell(
            "Gestión de Sucursales",
            "Administra las sucursales de la empresa",
            html! {
                <button onclick={on_new} class="flex items-center gap-2 bg-[#173E63] text-white px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    { icon_plus() }
                    {"Nueva Sucursal"}
                </button>
            },
            html! {
                <>
                    { notice_banner(&notice) }

                    <div class="bg-card rounded-[10px] p-4 border border-border grid grid-cols-1 md:grid-cols-5 gap-3">
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Buscar"}</label>
                            <div class="relative">
                                <span class="absolute left-3 top-2.5 text-slate-400">{ icon_search() }</span>
                                <input type="text" placeholder="Buscar por nombre..."
                                    value={filters.name.clone().unwrap_or_default()}
                                    oninput={on_search}
                                    class="w-full bg-[#f1f4f9] rounded-[10px] pl-8 pr-3 py-2 text-sm text-[#173E63] border-none" />
                            </div>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Estado"}</label>
                            <select value={estado_value} onchange={on_estado_change}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none">
                                <option value="" selected={estado_value.is_empty()}>{"Todas"}</option>
                                <option value="true" selected={estado_value == "true"}>{"Activas"}</option>
                                <option value="false" selected={estado_value == "false"}>{"Inactivas"}</option>
                            </select>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Ordenar por"}</label>
                            <select onchange={on_sort_by_change}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none">
                                <option value="" selected={sort_by_value.is_empty()}>{"Por defecto"}</option>
                                <option value="name" selected={sort_by_value == "name"}>{"Nombre"}</option>
                                <option value="code" selected={sort_by_value == "code"}>{"Código"}</option>
                                <option value="createdAt" selected={sort_by_value == "createdAt"}>{"Fecha de creación"}</option>
                                <option value="updatedAt" selected={sort_by_value == "updatedAt"}>{"Última actualización"}</option>
                            </select>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Orden"}</label>
                            <select onchange={on_sort_order_change}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none">
                                <option value="" selected={sort_order_value.is_empty()}>{"Por defecto"}</option>
                                <option value="ASC" selected={sort_order_value == "ASC"}>{"Ascendente"}</option>
                                <option value="DESC" selected={sort_order_value == "DESC"}>{"Descendente"}</option>
                            </select>
                        </div>
                        <div class="flex items-end">
                            <button onclick={on_clear_filters} disabled={*loading}
                                class="px-4 py-2 text-sm rounded-[10px] text-slate-500 hover:bg-slate-100">
                                {"Limpiar"}
                            </button>
                        </div>
                    </div>

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="p-4 flex justify-between items-center border-b border-border">
                            <span class="text-sm text-muted-foreground">
                                { if *loading {
                                    "Cargando...".to_string()
                                } else {
                                    format!("Mostrando {} de {} sucursales", sucursales.len(), pagination.total)
                                }}
                            </span>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-6 py-3 font-bold">{"Nombre"}</th>
                                        <th class="px-6 py-3 font-bold">{"Dirección"}</th>
                                        <th class="px-6 py-3 font-bold">{"Teléfono"}</th>
                                        <th class="px-6 py-3 font-bold">{"Estado"}</th>
                                        <th class="px-6 py-3 font-bold">{"Creada"}</th>
                                        <th class="px-6 py-3 font-bold">{"Acciones"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if *loading {
                                        html! { <tr><td colspan="6" class="px-6 py-6 text-center text-muted-foreground">{"Cargando..."}</td></tr> }
                                    } else if sucursales.is_empty() {
                                        html! { <tr><td colspan="6" class="px-6 py-6 text-center text-muted-foreground">{"No se encontraron sucursales"}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                                { for sucursales.iter().map(|sucursal| {
                                                    let on_toggle = on_toggle.clone();
                                                    let on_edit = {
                                                        let editing = editing.clone();
                                                        let show_form = show_form.clone();
                                                        let s = sucursal.clone();
                                                        Callback::from(move |_| {
                                                            editing.set(Some(s.clone()));
                                                            show_form.set(true);
                                                        })
                                                    };
                                                    let on_delete = {
                                                        let delete_target = delete_target.clone();
                                                        let s = sucursal.clone();
                                                        Callback::from(move |_| delete_target.set(Some(s.clone())))
                                                    };
                                                    let toggle_s = sucursal.clone();

                                                    html! {
                                                        <tr key={sucursal.id} class="text-sm hover:bg-muted/30 transition-colors">
                                                            <td class="px-6 py-3">
                                                                <p class="font-semibold text-foreground">{ &sucursal.name }</p>
                                                                { if let Some(code) = &sucursal.code {
                                                                    html! { <p class="text-xs text-muted-foreground">{ code.clone() }</p> }
                                                                } else { html!{} } }
                                                            </td>
                                                            <td class="px-6 py-3 text-muted-foreground">{ sucursal.address.clone().unwrap_or_else(|| "—".to_string()) }</td>
                                                            <td class="px-6 py-3 text-muted-foreground">{ sucursal.phone.clone().unwrap_or_else(|| "—".to_string()) }</td>
                                                            <td class="px-6 py-3">
                                                                { if sucursal.is_active {
                                                                    html! { <span class="bg-green-100 text-green-800 px-2.5 py-1 rounded-full text-[10px] font-bold">{"Activa"}</span> }
                                                                } else {
                                                                    html! { <span class="bg-slate-100 text-slate-600 px-2.5 py-1 rounded-full text-[10px] font-bold">{"Inactiva"}</span> }
                                                                }}
                                                            </td>
                                                            <td class="px-6 py-3 text-muted-foreground">{ format_date(&sucursal.created_at) }</td>
                                                            <td class="px-6 py-3">
                                                                <div class="flex items-center gap-1">
                                                                    <button title="Activar/Desactivar" disabled={*saving}
                                                                        onclick={Callback::from(move |_| on_toggle.emit(toggle_s.clone()))}
                                                                        class="p-1.5 rounded-lg text-slate-500 hover:bg-slate-100">
                                                                        { icon_toggle() }
                                                                    </button>
                                                                    <button title="Editar" disabled={*saving} onclick={on_edit}
                                                                        class="p-1.5 rounded-lg text-yellow-600 hover:bg-yellow-50">
                                                                        { icon_edit() }
                                                                    </button>
                                                                    <button title="Eliminar" disabled={*saving} onclick={on_delete}
                                                                        class="p-1.5 rounded-lg text-red-600 hover:bg-red-50">
                                                                        { icon_trash() }
                                                                    </button>
                                                                </div>
                                                            </td>
                                                        </tr>
                                                    }
                                                }) }
                                            </>
                                        }
                                    }}
                                </tbody>
                            </table>
                        </div>
                        <div class="px-4 pb-4">
                            <PaginationControls
                                page={pagination.page}
                                total_pages={pagination.total_pages}
                                disabled={*loading}
                                on_change={on_page_change} />
                        </div>
                    </div>

                    {
                        if *show_form {
                            html! {
                                <SucursalFormModal
                                    initial={(*editing).clone()}
                                    saving={*saving}
                                    on_submit={on_submit_form}
                                    on_cancel={on_cancel_form} />
                            }
                        } else {
                            html! {}
                        }
                    }

                    {
                        if let Some(target) = &*delete_target {
                            let on_close = {
                                let delete_target = delete_target.clone();
                                Callback::from(move |_| delete_target.set(None))
                            };
                            html! {
                                <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50 p-4">
                                    <div class="bg-white rounded-[16px] shadow-xl w-full max-w-md p-6">
                                        <h3 class="text-lg font-bold text-[#173E63] mb-2">{"Eliminar Sucursal"}</h3>
                                        <p class="text-sm text-slate-600">
                                            { format!("¿Estás seguro de eliminar la sucursal \"{}\"? Esta acción no se puede deshacer.", target.name) }
                                        </p>
                                        <div class="flex justify-end gap-3 mt-6">
                                            <button onclick={on_close} disabled={*saving}
                                                class="px-4 py-2 text-sm rounded-[10px] text-slate-500 hover:bg-slate-100">
                                                {"Cancelar"}
                                            </button>
                                            <button onclick={on_confirm_delete.clone()} disabled={*saving}
                                                class="px-4 py-2 text-sm rounded-[10px] bg-red-600 text-white font-bold disabled:opacity-60">
                                                { if *saving { "Eliminando..." } else { "Eliminar" } }
                                            </button>
                                        </div>
                                    </div>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </>
            }
        ) }
    }
}
